use super::fixtures_dir;
use crate::XtaskError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GenParams {
    pub(crate) nodes: usize,
    /// Nodes `0..faction_size` form faction 1, the rest faction 2.
    pub(crate) faction_size: usize,
    pub(crate) density: f64,
    /// Target share of triangles whose sign product is negative.
    pub(crate) unbalanced: f64,
    /// Thinning retries before giving up on connectivity.
    pub(crate) attempts: usize,
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            nodes: 10,
            faction_size: 5,
            density: 0.3,
            unbalanced: 0.1,
            attempts: 100,
        }
    }
}

impl GenParams {
    fn validate(&self) -> Result<(), XtaskError> {
        if self.nodes < 2 {
            return Err(XtaskError::GenerateFailed("--nodes must be at least 2".into()));
        }
        if self.faction_size > self.nodes {
            return Err(XtaskError::GenerateFailed(format!(
                "--faction-size {} exceeds --nodes {}",
                self.faction_size, self.nodes
            )));
        }
        if !(self.density > 0.0 && self.density <= 1.0) {
            return Err(XtaskError::GenerateFailed("--density must be in (0, 1]".into()));
        }
        if !(0.0..=1.0).contains(&self.unbalanced) {
            return Err(XtaskError::GenerateFailed("--unbalanced must be in [0, 1]".into()));
        }
        if self.attempts == 0 {
            return Err(XtaskError::GenerateFailed("--attempts must be positive".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SignedGraph {
    nodes: usize,
    faction_size: usize,
    /// `(a, b)` with `a < b` -> `+1` / `-1`.
    edges: BTreeMap<(usize, usize), i8>,
}

impl SignedGraph {
    /// Complete graph with positive edges inside each faction and negative edges across.
    fn complete_balanced(nodes: usize, faction_size: usize) -> Self {
        let mut g = Self {
            nodes,
            faction_size,
            edges: BTreeMap::new(),
        };
        for a in 0..nodes {
            for b in (a + 1)..nodes {
                let w = if g.faction(a) == g.faction(b) { 1 } else { -1 };
                g.edges.insert((a, b), w);
            }
        }
        g
    }

    pub(crate) fn faction(&self, v: usize) -> usize {
        if v < self.faction_size { 1 } else { 2 }
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn density(&self) -> f64 {
        let pairs = self.nodes * (self.nodes - 1) / 2;
        if pairs == 0 {
            return 0.0;
        }
        self.edges.len() as f64 / pairs as f64
    }

    fn adjacency(&self) -> Vec<BTreeSet<usize>> {
        let mut adj = vec![BTreeSet::new(); self.nodes];
        for &(a, b) in self.edges.keys() {
            adj[a].insert(b);
            adj[b].insert(a);
        }
        adj
    }

    pub(crate) fn is_connected(&self) -> bool {
        let adj = self.adjacency();
        let mut seen = vec![false; self.nodes];
        let mut queue = VecDeque::from([0usize]);
        seen[0] = true;
        let mut reached = 1;
        while let Some(v) = queue.pop_front() {
            for &w in &adj[v] {
                if !seen[w] {
                    seen[w] = true;
                    reached += 1;
                    queue.push_back(w);
                }
            }
        }
        reached == self.nodes
    }

    pub(crate) fn triangles(&self) -> Vec<[usize; 3]> {
        let adj = self.adjacency();
        let mut out = Vec::new();
        for &(a, b) in self.edges.keys() {
            for &c in adj[a].intersection(&adj[b]) {
                if c > b {
                    out.push([a, b, c]);
                }
            }
        }
        out
    }

    fn weight(&self, a: usize, b: usize) -> i8 {
        let key = if a < b { (a, b) } else { (b, a) };
        self.edges.get(&key).copied().unwrap_or(0)
    }

    fn triangle_sign(&self, t: &[usize; 3]) -> i8 {
        self.weight(t[0], t[1]) * self.weight(t[0], t[2]) * self.weight(t[1], t[2])
    }

    pub(crate) fn unbalanced_ratio(&self, triangles: &[[usize; 3]]) -> f64 {
        if triangles.is_empty() {
            return 0.0;
        }
        let unbalanced = triangles
            .iter()
            .filter(|t| self.triangle_sign(t) < 0)
            .count();
        unbalanced as f64 / triangles.len() as f64
    }

    fn flip(&mut self, a: usize, b: usize) {
        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(w) = self.edges.get_mut(&key) {
            *w = -*w;
        }
    }

    /// One `source,target,weight,groupSource,groupTarget` line per edge, factions as groups.
    pub(crate) fn to_edge_list(&self) -> String {
        let mut out = String::new();
        for (&(a, b), &w) in &self.edges {
            let _ = writeln!(out, "{a},{b},{w},{},{}", self.faction(a), self.faction(b));
        }
        out
    }
}

fn thin(graph: &mut SignedGraph, density: f64, rng: &mut StdRng) {
    while graph.density() > density && !graph.edges.is_empty() {
        let idx = rng.gen_range(0..graph.edges.len());
        if let Some(&key) = graph.edges.keys().nth(idx) {
            graph.edges.remove(&key);
        }
    }
}

fn unbalance(graph: &mut SignedGraph, target: f64, rng: &mut StdRng) -> Result<(), XtaskError> {
    if target <= 0.0 {
        return Ok(());
    }
    let triangles = graph.triangles();
    if triangles.is_empty() {
        return Err(XtaskError::GenerateFailed(
            "graph has no triangles to unbalance; raise --density".into(),
        ));
    }

    let max_flips = triangles.len() * 10 + 100;
    for _ in 0..max_flips {
        if graph.unbalanced_ratio(&triangles) >= target {
            return Ok(());
        }
        let balanced: Vec<&[usize; 3]> = triangles
            .iter()
            .filter(|t| graph.triangle_sign(t) > 0)
            .collect();
        if balanced.is_empty() {
            break;
        }
        let t = balanced[rng.gen_range(0..balanced.len())];
        let i = rng.gen_range(0..3);
        let j = (i + rng.gen_range(1..3)) % 3;
        graph.flip(t[i], t[j]);
    }

    let ratio = graph.unbalanced_ratio(&triangles);
    if ratio >= target {
        Ok(())
    } else {
        Err(XtaskError::GenerateFailed(format!(
            "stopped at unbalanced ratio {ratio:.3}, below the target {target}"
        )))
    }
}

pub(crate) fn generate(params: &GenParams, rng: &mut StdRng) -> Result<SignedGraph, XtaskError> {
    params.validate()?;

    for _ in 0..params.attempts {
        let mut g = SignedGraph::complete_balanced(params.nodes, params.faction_size);
        thin(&mut g, params.density, rng);
        if !g.is_connected() {
            continue;
        }
        unbalance(&mut g, params.unbalanced, rng)?;
        return Ok(g);
    }

    Err(XtaskError::GenerateFailed(format!(
        "no connected graph after {} attempts; raise --density",
        params.attempts
    )))
}

pub(crate) fn gen_graph(args: Vec<String>) -> Result<(), XtaskError> {
    let mut params = GenParams::default();
    let mut faction_size: Option<usize> = None;
    let mut seed: u64 = 0;
    let mut count: usize = 1;
    let mut out_dir: Option<PathBuf> = None;
    let mut to_stdout = false;

    fn value<'a>(args: &'a [String], i: usize) -> Result<&'a str, XtaskError> {
        args.get(i).map(|s| s.trim()).ok_or(XtaskError::Usage)
    }

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--nodes" => {
                i += 1;
                params.nodes = value(&args, i)?.parse().map_err(|_| XtaskError::Usage)?;
            }
            "--faction-size" => {
                i += 1;
                faction_size = Some(value(&args, i)?.parse().map_err(|_| XtaskError::Usage)?);
            }
            "--density" => {
                i += 1;
                params.density = value(&args, i)?.parse().map_err(|_| XtaskError::Usage)?;
            }
            "--unbalanced" => {
                i += 1;
                params.unbalanced = value(&args, i)?.parse().map_err(|_| XtaskError::Usage)?;
            }
            "--attempts" => {
                i += 1;
                params.attempts = value(&args, i)?.parse().map_err(|_| XtaskError::Usage)?;
            }
            "--seed" => {
                i += 1;
                seed = value(&args, i)?.parse().map_err(|_| XtaskError::Usage)?;
            }
            "--count" => {
                i += 1;
                count = value(&args, i)?.parse().map_err(|_| XtaskError::Usage)?;
            }
            "--out" => {
                i += 1;
                out_dir = Some(PathBuf::from(value(&args, i)?));
            }
            "--stdout" => to_stdout = true,
            "--help" | "-h" => return Err(XtaskError::Usage),
            _ => return Err(XtaskError::Usage),
        }
        i += 1;
    }
    params.faction_size = faction_size.unwrap_or(params.nodes / 2);

    let out_dir = out_dir.unwrap_or_else(fixtures_dir);
    let mut rng = StdRng::seed_from_u64(seed);

    for idx in 0..count {
        let g = generate(&params, &mut rng)?;
        let text = g.to_edge_list();
        let ratio = g.unbalanced_ratio(&g.triangles());

        if to_stdout {
            print!("{text}");
            continue;
        }

        fs::create_dir_all(&out_dir).map_err(|source| XtaskError::WriteFile {
            path: out_dir.display().to_string(),
            source,
        })?;
        let path = out_dir.join(format!(
            "graph_{}_{}_{}_{idx}.txt",
            params.nodes, params.density, params.unbalanced
        ));
        fs::write(&path, &text).map_err(|source| XtaskError::WriteFile {
            path: path.display().to_string(),
            source,
        })?;
        println!(
            "wrote {} ({} edges, density {:.3}, unbalanced ratio {ratio:.3})",
            path.display(),
            g.edge_count(),
            g.density()
        );
    }

    Ok(())
}
