//! Edge-list ingestion.
//!
//! Each non-empty line is `sourceId,targetId,weight,groupSource,groupTarget`. Node ids in the
//! input may be arbitrary integers; they are renumbered to `0..n` in first-appearance order.

use indexmap::IndexMap;

use super::{CanonicalGraph, Edge, Node, Sign};
use crate::error::{Error, Result};

const FIELD_COUNT: usize = 5;

pub fn parse_edge_list(text: &str) -> Result<CanonicalGraph> {
    // original id -> canonical id; insertion order is the renumbering order.
    let mut ids: IndexMap<i64, usize> = IndexMap::new();
    let mut nodes: Vec<Node> = Vec::new();
    let mut edges: Vec<Edge> = Vec::new();

    for (idx, raw) in text.split('\n').enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = idx + 1;

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < FIELD_COUNT {
            return Err(Error::parse(
                line_no,
                format!(
                    "expected {FIELD_COUNT} comma-separated fields, found {}",
                    fields.len()
                ),
            ));
        }

        let source_id = parse_int(fields[0], line_no, "sourceId")?;
        let target_id = parse_int(fields[1], line_no, "targetId")?;
        let weight = parse_int(fields[2], line_no, "weight")?;
        let group_source = fields[3].parse::<i64>().unwrap_or(0);
        let group_target = fields[4].parse::<i64>().unwrap_or(0);

        let source = intern(&mut ids, &mut nodes, source_id, group_source);
        let target = intern(&mut ids, &mut nodes, target_id, group_target);

        edges.push(Edge {
            id: idx,
            source,
            target,
            sign: Sign::from_weight(weight),
            consecutive: None,
        });
    }

    if edges.is_empty() {
        return Err(Error::EmptyGraph);
    }

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        "parsed signed edge list"
    );

    Ok(CanonicalGraph {
        nodes,
        edges,
        original_ids: ids.into_keys().collect(),
    })
}

fn parse_int(field: &str, line: usize, name: &str) -> Result<i64> {
    field
        .parse::<i64>()
        .map_err(|_| Error::parse(line, format!("{name} is not an integer: {field:?}")))
}

fn intern(
    ids: &mut IndexMap<i64, usize>,
    nodes: &mut Vec<Node>,
    original: i64,
    group: i64,
) -> usize {
    if let Some(&id) = ids.get(&original) {
        return id;
    }
    let id = nodes.len();
    ids.insert(original, id);
    nodes.push(Node::new(id, group));
    id
}
