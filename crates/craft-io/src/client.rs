use std::sync::{Mutex, PoisonError};

/// Outbound requests to a multiplayer server. Inbound updates are applied
/// to the game state by the caller; this side only sends.
pub trait Client: Send + Sync {
    /// Asks for the edits of chunk `(p, q)` newer than `key`.
    fn chunk(&self, p: i32, q: i32, key: i32);
    fn block(&self, x: i32, y: i32, z: i32, w: i32);
    fn light(&self, x: i32, y: i32, z: i32, w: i32);
    fn sign(&self, x: i32, y: i32, z: i32, face: i32, text: &str);
}

/// Single-player: nothing is sent.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineClient;

impl Client for OfflineClient {
    fn chunk(&self, _p: i32, _q: i32, _key: i32) {}
    fn block(&self, _x: i32, _y: i32, _z: i32, _w: i32) {}
    fn light(&self, _x: i32, _y: i32, _z: i32, _w: i32) {}
    fn sign(&self, _x: i32, _y: i32, _z: i32, _face: i32, _text: &str) {}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientRequest {
    Chunk { p: i32, q: i32, key: i32 },
    Block { x: i32, y: i32, z: i32, w: i32 },
    Light { x: i32, y: i32, z: i32, w: i32 },
    Sign { x: i32, y: i32, z: i32, face: i32, text: String },
}

/// Keeps every request in order; handy for inspecting what a session sent.
#[derive(Debug, Default)]
pub struct RecordingClient {
    sent: Mutex<Vec<ClientRequest>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, req: ClientRequest) {
        log::trace!(target: "client", "{:?}", req);
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).push(req);
    }

    /// Drains and returns the recorded requests.
    pub fn take(&self) -> Vec<ClientRequest> {
        std::mem::take(&mut *self.sent.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Client for RecordingClient {
    fn chunk(&self, p: i32, q: i32, key: i32) {
        self.push(ClientRequest::Chunk { p, q, key });
    }

    fn block(&self, x: i32, y: i32, z: i32, w: i32) {
        self.push(ClientRequest::Block { x, y, z, w });
    }

    fn light(&self, x: i32, y: i32, z: i32, w: i32) {
        self.push(ClientRequest::Light { x, y, z, w });
    }

    fn sign(&self, x: i32, y: i32, z: i32, face: i32, text: &str) {
        self.push(ClientRequest::Sign {
            x,
            y,
            z,
            face,
            text: text.to_owned(),
        });
    }
}
