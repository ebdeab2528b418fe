#![allow(dead_code)]

use async_trait::async_trait;
use nogashio::{DialogueGenerator, GenerationError, GenerationRequest, TurnResolver};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const TEST_MODEL: &str = "test-model";

/// Replays canned replies in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<String, GenerationError>>) -> Arc<Self> {
        Arc::new(ScriptedGenerator {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DialogueGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::Transport("script exhausted".into())))
    }
}

pub fn reply(dialogue: &str, agitation: i32, mental: i32, evidence: i32) -> Result<String, GenerationError> {
    Ok(json!({
        "dialogue": dialogue,
        "agitationUpdate": agitation,
        "mentalUpdate": mental,
        "evidenceUpdate": evidence,
    })
    .to_string())
}

pub fn raw(body: &str) -> Result<String, GenerationError> {
    Ok(body.to_string())
}

pub fn transport_failure() -> Result<String, GenerationError> {
    Err(GenerationError::Transport("connection refused".into()))
}

pub fn resolver_with(
    replies: Vec<Result<String, GenerationError>>,
) -> (TurnResolver, Arc<ScriptedGenerator>) {
    let generator = ScriptedGenerator::new(replies);
    (TurnResolver::new(generator.clone(), TEST_MODEL), generator)
}
