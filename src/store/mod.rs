use serde::Deserialize;
use std::collections::HashMap;

use crate::error::ChatError;
use crate::types::{Transcript, Turn};

/// How new session identifiers are minted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    /// Decimal counter starting at 1. Never reuses a value.
    #[default]
    Sequential,
    /// Random v4 UUID.
    Uuid,
}

/// In-memory session store. Maps a session id to its transcript for the
/// lifetime of the process. No eviction, no size cap.
pub struct SessionStore {
    scheme: IdScheme,
    next_id: u64,
    sessions: HashMap<String, Transcript>,
}

impl SessionStore {
    pub fn new(scheme: IdScheme) -> Self {
        Self {
            scheme,
            next_id: 1,
            sessions: HashMap::new(),
        }
    }

    /// Return the transcript for `session_id` if it is known, otherwise mint
    /// a fresh id and store an empty transcript under it.
    ///
    /// An empty or unrecognized id is treated as absent.
    pub fn resolve_or_create(&mut self, session_id: Option<&str>) -> (String, &Transcript) {
        let id = match session_id {
            Some(id) if !id.is_empty() && self.sessions.contains_key(id) => id.to_string(),
            _ => {
                let id = self.mint_id();
                self.sessions.insert(id.clone(), Transcript::new());
                id
            }
        };
        let transcript = &self.sessions[&id];
        (id, transcript)
    }

    /// Append a turn to an existing session.
    pub fn append(&mut self, session_id: &str, turn: Turn) -> Result<(), ChatError> {
        let transcript = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| ChatError::NotFound(session_id.to_string()))?;
        transcript.push(turn);
        Ok(())
    }

    pub fn get(&self, session_id: &str) -> Option<&Transcript> {
        self.sessions.get(session_id)
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    pub fn count(&self) -> usize {
        self.sessions.len()
    }

    fn mint_id(&mut self) -> String {
        loop {
            let candidate = match self.scheme {
                IdScheme::Sequential => {
                    let id = self.next_id;
                    self.next_id += 1;
                    id.to_string()
                }
                IdScheme::Uuid => uuid::Uuid::new_v4().to_string(),
            };
            if !self.sessions.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(IdScheme::default())
    }
}
