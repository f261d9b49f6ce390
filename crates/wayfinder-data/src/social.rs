//! Co-appearance graph: characters linked by the books they share

use std::path::Path;

use tracing::info;
use wayfinder_core::{bfs, Edge, Graph, Node};

use crate::error::Result;
use crate::loader::{load_co_appearances, CoAppearances};

/// Characters as nodes, book titles as edge labels.
pub type SocialGraph = Graph<String, String>;

/// Build the co-appearance graph.
///
/// Every pair of distinct characters sharing a book gets one edge in each
/// direction labeled with that book.
pub fn build_graph(data: &CoAppearances) -> Result<SocialGraph> {
    let mut graph = Graph::new();

    for character in &data.characters {
        graph.add_node(Node::new(character.clone()));
    }

    for (book, cast) in &data.books {
        for (i, first) in cast.iter().enumerate() {
            let first = Node::new(first.clone());
            for second in cast.iter().skip(i + 1) {
                let second = Node::new(second.clone());
                graph.add_edge(&first, &second, book.clone())?;
                graph.add_edge(&second, &first, book.clone())?;
            }
        }
    }

    info!(
        "Built co-appearance graph: {} characters, {} edges",
        graph.size(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Load a `character,book` file and build its graph.
pub fn load_graph(path: &Path) -> Result<SocialGraph> {
    build_graph(&load_co_appearances(path)?)
}

/// Fewest-book chain of co-appearances between two characters.
pub fn find_connection(graph: &SocialGraph, from: &str, to: &str) -> Result<Option<Vec<Edge<String, String>>>> {
    let start = Node::new(from.to_string());
    let dest = Node::new(to.to_string());
    Ok(bfs::shortest_path(graph, &start, &dest)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_co_appearances;
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::time::{Duration, Instant};

    fn sample() -> SocialGraph {
        let input = "\
Hulk,Avengers 1
Thor,Avengers 1
Iron Man,Avengers 1
Thor,Asgard 7
Loki,Asgard 7
Loki,Villains 2
Spider-Man,Daily Bugle 3
";
        build_graph(&parse_co_appearances(Cursor::new(input)).unwrap()).unwrap()
    }

    #[test]
    fn test_edges_both_directions_per_book() {
        let graph = sample();
        assert_eq!(graph.size(), 5);
        let hulk = Node::new("Hulk".to_string());
        let thor = Node::new("Thor".to_string());
        assert_eq!(graph.num_edges(&hulk, &thor).unwrap(), 1);
        assert_eq!(graph.num_edges(&thor, &hulk).unwrap(), 1);
        // Avengers 1: 3 pairs * 2, Asgard 7: 1 pair * 2
        assert_eq!(graph.edge_count(), 8);
        // no self edges from single-character books
        let loki = Node::new("Loki".to_string());
        assert_eq!(graph.num_edges(&loki, &loki).unwrap(), 0);
    }

    #[test]
    fn test_connection_through_shared_books() {
        let graph = sample();
        let route = find_connection(&graph, "Hulk", "Loki").unwrap().unwrap();
        let hops: Vec<_> = route
            .iter()
            .map(|e| (e.target().data().as_str(), e.label().as_str()))
            .collect();
        assert_eq!(hops, vec![("Thor", "Avengers 1"), ("Loki", "Asgard 7")]);
    }

    #[test]
    fn test_isolated_character_has_no_connection() {
        let graph = sample();
        assert!(find_connection(&graph, "Hulk", "Spider-Man").unwrap().is_none());
    }

    #[test]
    fn test_large_book_builds_quickly() {
        let cast: Vec<String> = (0..300).map(|i| format!("character {:03}", i)).collect();
        let data = CoAppearances {
            characters: cast.iter().cloned().collect(),
            books: HashMap::from([("Crossover 1".to_string(), cast)]),
        };

        let started = Instant::now();
        let graph = build_graph(&data).unwrap();
        let elapsed = started.elapsed();

        assert_eq!(graph.edge_count(), 300 * 299);
        assert!(elapsed < Duration::from_secs(10), "build took {:?}", elapsed);
    }

    #[test]
    fn test_unknown_character_is_error() {
        let graph = sample();
        assert!(find_connection(&graph, "Hulk", "Batman").is_err());
    }
}
