use crate::layout::{ConnectorStyle, Layout};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub strategy: String,
    pub palette: String,
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub connectors: Vec<ConnectorDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: usize,
    pub parent: Option<usize>,
    pub depth: usize,
    pub topic: String,
    pub lines: Vec<String>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color_index: usize,
}

#[derive(Debug, Serialize)]
pub struct ConnectorDump {
    pub from: usize,
    pub to: usize,
    pub style: ConnectorStyle,
    pub points: Vec<[f32; 2]>,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.index(),
                parent: node.parent.map(|parent| parent.index()),
                depth: node.depth,
                topic: node.topic.clone(),
                lines: node.lines.clone(),
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
                color_index: node.color_index,
            })
            .collect();

        let connectors = layout
            .connectors
            .iter()
            .map(|connector| ConnectorDump {
                from: connector.from.index(),
                to: connector.to.index(),
                style: connector.style,
                points: connector.points.iter().map(|(x, y)| [*x, *y]).collect(),
            })
            .collect();

        LayoutDump {
            strategy: layout.strategy.to_string(),
            palette: layout.palette.to_string(),
            width: layout.width,
            height: layout.height,
            nodes,
            connectors,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
