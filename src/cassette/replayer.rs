//! Replays recorded interactions from a cassette.

use std::collections::HashMap;
use std::path::Path;

use super::format::{Cassette, Interaction};
use crate::error::{FileStoreError, Result};

/// Queue key: one stream per port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CallKey {
    port: String,
    method: String,
}

impl CallKey {
    fn new(port: &str, method: &str) -> Self {
        Self { port: port.to_string(), method: method.to_string() }
    }
}

/// Serves a cassette's interactions back in recorded order, independently
/// for each port/method pair.
pub struct CassetteReplayer {
    queues: HashMap<CallKey, Vec<Interaction>>,
    cursors: HashMap<CallKey, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<CallKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry(CallKey::new(&interaction.port, &interaction.method))
                .or_default()
                .push(interaction.clone());
        }
        let cursors = queues.keys().map(|k| (k.clone(), 0)).collect();
        Self { queues, cursors }
    }

    /// Read and parse a cassette YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid cassette.
    pub fn load(path: &Path) -> Result<Cassette> {
        let content =
            std::fs::read_to_string(path).map_err(|e| FileStoreError::from_io(path, e))?;
        serde_yaml::from_str(&content).map_err(|e| FileStoreError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the given
    /// port/method combination, naming what was requested and what remains.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> &Interaction {
        let key = CallKey::new(port, method);

        let Some(queue) = self.queues.get(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        };

        let cursor = self.cursors.get_mut(&key).expect("cursor exists for every queue");
        assert!(
            *cursor < queue.len(),
            "Cassette exhausted: all {count} interactions for port={port:?} method={method:?} \
             have been consumed. Last interaction was seq={last_seq}.",
            count = queue.len(),
            last_seq = queue.last().map_or(0, |i| i.seq),
        );

        let interaction = &queue[*cursor];
        *cursor += 1;
        interaction
    }
}
