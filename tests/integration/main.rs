//! Integration tests for Wayfinder
//!
//! These tests load datasets from disk and drive them through the server,
//! the script interpreter and the CLI together.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tempfile::TempDir;
use tower::ServiceExt;
use wayfinder_core::{bfs, Node};
use wayfinder_data::{social, CampusMap};
use wayfinder_script::{transcript, Social};
use wayfinder_server::{router::create_router, ServerConfig, WayfinderServer};

const BUILDINGS: &str = "\
shortName,longName,x,y
BAG,Bagley Hall (East Entrance),1914.5103,1708.8816
CSE,Paul G. Allen Center for Computer Science & Engineering,2259.7112,1715.5273
MGH,Mary Gates Hall (North Entrance),1867.1849,1442.7836
";

const PATHS: &str = "\
x1,y1,x2,y2,distance
1914.5103,1708.8816,2000.0,1700.0,100.0
2000.0,1700.0,1914.5103,1708.8816,100.0
2000.0,1700.0,2259.7112,1715.5273,300.0
2259.7112,1715.5273,2000.0,1700.0,300.0
1914.5103,1708.8816,2259.7112,1715.5273,450.0
1867.1849,1442.7836,1914.5103,1708.8816,250.0
";

const CHARACTERS: &str = "\
\"CAPTAIN AMERICA\",\"AVF 4\"
\"IRON MAN/TONY STARK\",\"AVF 4\"
\"IRON MAN/TONY STARK\",\"IM 12\"
\"PEPPER POTTS\",\"IM 12\"
\"HOWARD THE DUCK\",\"HTD 1\"
";

fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("campus_buildings.csv"), BUILDINGS).unwrap();
    std::fs::write(dir.path().join("campus_paths.csv"), PATHS).unwrap();
    std::fs::write(dir.path().join("marvel.csv"), CHARACTERS).unwrap();
    dir
}

fn campus(dir: &Path) -> CampusMap {
    CampusMap::load(&dir.join("campus_buildings.csv"), &dir.join("campus_paths.csv")).unwrap()
}

/// Campus files on disk route through the waypoint rather than the direct walkway
#[test]
fn test_campus_route_from_files() {
    let dir = data_dir();
    let map = campus(dir.path());

    let path = map.find_shortest_path("BAG", "CSE").unwrap().unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(path.cost(), 400.0);

    // one-way walkway out of MGH
    assert!(map.find_shortest_path("CSE", "MGH").unwrap().is_none());
    assert_eq!(map.find_shortest_path("MGH", "CSE").unwrap().unwrap().cost(), 650.0);
}

/// The HTTP layer serves routes from a map loaded from disk
#[tokio::test]
async fn test_server_routes_loaded_campus() {
    let dir = data_dir();
    let server = WayfinderServer::new(
        campus(dir.path()),
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
    );
    assert_eq!(server.config().port, 0);
    let app = create_router(server.state());

    let request = Request::builder()
        .uri("/find-path?start=BAG&end=CSE")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let segments: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[1]["cost"], 300.0);

    let request = Request::builder().uri("/get-buildings").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let names: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(names.keys().collect::<Vec<_>>(), vec!["BAG", "CSE", "MGH"]);
}

/// Co-appearance files build a graph that BFS can connect through
#[test]
fn test_social_connection_from_file() {
    let dir = data_dir();
    let graph = social::load_graph(&dir.path().join("marvel.csv")).unwrap();

    let edges = social::find_connection(&graph, "CAPTAIN AMERICA", "PEPPER POTTS")
        .unwrap()
        .unwrap();
    let books: Vec<_> = edges.iter().map(|e| e.label().as_str()).collect();
    assert_eq!(books, vec!["AVF 4", "IM 12"]);

    let start = Node::new("CAPTAIN AMERICA".to_string());
    let path = bfs::edges_to_path(&start, &edges, |_| 1.0);
    assert_eq!(path.cost(), 2.0);

    assert!(social::find_connection(&graph, "PEPPER POTTS", "HOWARD THE DUCK")
        .unwrap()
        .is_none());
}

/// Scripts can load a dataset by name and search it
#[test]
fn test_script_session_over_dataset() {
    let dir = data_dir();
    let out = transcript(
        Social::new(dir.path()),
        "LoadGraph marvel marvel.csv\nFindPath marvel PEPPER CAPTAIN\n",
    )
    .unwrap();
    assert_eq!(out, "loaded graph marvel\nunknown: PEPPER\nunknown: CAPTAIN\n");
}

/// The binary reports its version
#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_wayfinder"))
        .arg("version")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Wayfinder v"));
}

/// The binary runs a weighted script from stdin
#[test]
fn test_cli_weighted_script() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_wayfinder"))
        .args(["script", "--dialect", "weighted"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"CreateGraph g\nAddNode g a\nAddNode g b\nAddEdge g a b 1.5\nFindPath g a b\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "created graph g\nadded node a to g\nadded node b to g\n\
         added edge 1.500 from a to b in g\npath from a to b:\n\
         a to b with weight 1.500\ntotal cost: 1.500\n"
    );
}

/// Route and building listings read the configured data directory
#[test]
fn test_cli_route_uses_data_dir() {
    let dir = data_dir();
    let output = Command::new(env!("CARGO_BIN_EXE_wayfinder"))
        .arg("--data-dir")
        .arg(dir.path())
        .args(["route", "BAG", "CSE"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Path from Bagley Hall (East Entrance) to Paul G. Allen Center"));
    assert!(stdout.ends_with("Total distance: 400.000\n"));
}
