//! CLI command implementations

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use wayfinder_data::{route_segments, social, CampusMap};
use wayfinder_script::{Dialect, Labeled, Session, Social, Weighted};
use wayfinder_server::{ServerConfig, WayfinderServer};

use crate::config::AppConfig;
use crate::DialectArg;

fn load_campus(config: &AppConfig) -> anyhow::Result<CampusMap> {
    let buildings = config.data.buildings_file();
    let paths = config.data.paths_file();
    CampusMap::load(&buildings, &paths).with_context(|| {
        format!(
            "failed to load campus data from {} and {}",
            buildings.display(),
            paths.display()
        )
    })
}

pub async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    tracing::info!(
        "Starting Wayfinder server on {}:{}",
        config.server.host,
        config.server.port
    );

    let campus = load_campus(config)?;
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    WayfinderServer::new(campus, server_config).start().await
}

pub fn script(config: &AppConfig, file: Option<PathBuf>, dialect: DialectArg) -> anyhow::Result<()> {
    let input: Box<dyn BufRead> = match &file {
        Some(path) => {
            tracing::info!("Running script {}", path.display());
            Box::new(BufReader::new(
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
            ))
        }
        None => Box::new(io::stdin().lock()),
    };

    match dialect {
        DialectArg::Labeled => run_session(Labeled, input),
        DialectArg::Social => run_session(Social::new(&config.data.dir), input),
        DialectArg::Weighted => run_session(Weighted, input),
    }
}

fn run_session<D: Dialect>(dialect: D, input: impl BufRead) -> anyhow::Result<()> {
    let mut session = Session::new(dialect, io::stdout().lock());
    session.run(input)?;
    Ok(())
}

pub fn route(config: &AppConfig, start: &str, end: &str) -> anyhow::Result<()> {
    let campus = load_campus(config)?;
    let mut out = io::stdout().lock();

    let Some(path) = campus.find_shortest_path(start, end)? else {
        writeln!(out, "no path found from {} to {}", start, end)?;
        return Ok(());
    };

    writeln!(
        out,
        "Path from {} to {}:",
        campus.long_name_for_short(start)?,
        campus.long_name_for_short(end)?
    )?;
    for segment in route_segments(&path) {
        writeln!(
            out,
            "  ({:.0}, {:.0}) -> ({:.0}, {:.0})  {:.3}",
            segment.x1, segment.y1, segment.x2, segment.y2, segment.cost
        )?;
    }
    writeln!(out, "Total distance: {:.3}", path.cost())?;
    Ok(())
}

pub fn connect(config: &AppConfig, from: &str, to: &str) -> anyhow::Result<()> {
    let file = config.data.characters_file();
    let graph = social::load_graph(&file)
        .with_context(|| format!("failed to load characters from {}", file.display()))?;
    let mut out = io::stdout().lock();

    let Some(edges) = social::find_connection(&graph, from, to)? else {
        writeln!(out, "no path found from {} to {}", from, to)?;
        return Ok(());
    };

    let mut parent = from;
    for edge in &edges {
        let child = edge.target().data().as_str();
        writeln!(out, "{} to {} via {}", parent, child, edge.label())?;
        parent = child;
    }
    Ok(())
}

pub fn buildings(config: &AppConfig) -> anyhow::Result<()> {
    let campus = load_campus(config)?;
    let mut out = io::stdout().lock();
    for (short_name, long_name) in campus.building_names() {
        writeln!(out, "{}: {}", short_name, long_name)?;
    }
    Ok(())
}
