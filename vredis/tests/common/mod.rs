//! Scripted in-memory transport for session tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use vredis::{Command, Connection, Connector, Error, Reply, RequestId, SessionConfig, SharedConfig};

/// What the next `send` on any mock connection does.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Answer with this reply.
    Reply(Reply),
    /// Fail with an I/O error and flag the connection broken.
    Transport,
    /// Fail without a reply, leaving the connection healthy.
    NoReply,
}

#[derive(Debug, Default)]
struct MockState {
    script: VecDeque<Scripted>,
    sent: Vec<(usize, String)>,
    connects: Vec<String>,
    refuse: usize,
    broken_on_connect: usize,
    open: usize,
}

/// Connector whose connections share one recorded history.
///
/// Unscripted sends answer `+OK`.
#[derive(Clone, Default)]
pub struct MockConnector {
    state: Arc<Mutex<MockState>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    /// Queue a reply for the next send.
    pub fn reply(&self, reply: Reply) -> &Self {
        self.state().script.push_back(Scripted::Reply(reply));
        self
    }

    /// Queue a transport failure for the next send.
    pub fn transport_error(&self) -> &Self {
        self.state().script.push_back(Scripted::Transport);
        self
    }

    /// Queue a reply-less failure for the next send.
    pub fn no_reply(&self) -> &Self {
        self.state().script.push_back(Scripted::NoReply);
        self
    }

    /// Refuse the next `count` connection attempts.
    pub fn refuse_connects(&self, count: usize) {
        self.state().refuse = count;
    }

    /// Hand out already broken connections for the next `count` attempts.
    pub fn broken_on_connect(&self, count: usize) {
        self.state().broken_on_connect = count;
    }

    /// Commands sent so far, space joined, across all connections.
    pub fn sent(&self) -> Vec<String> {
        self.state().sent.iter().map(|(_, line)| line.clone()).collect()
    }

    /// Commands sent so far with the id of the connection that sent them.
    pub fn sent_on(&self) -> Vec<(usize, String)> {
        self.state().sent.clone()
    }

    /// Addresses of every connection attempt, refused ones included.
    pub fn connects(&self) -> Vec<String> {
        self.state().connects.clone()
    }

    /// Number of mock connections currently alive.
    pub fn open_connections(&self) -> usize {
        self.state().open
    }
}

impl Connector for MockConnector {
    type Connection = MockConnection;

    fn connect(&self, config: &SessionConfig) -> Result<MockConnection, Error> {
        let mut state = self.state();
        state.connects.push(config.addr());
        if state.refuse > 0 {
            state.refuse -= 1;
            return Err(Error::Config {
                addr: config.addr(),
                source: Box::new(std::io::Error::from(std::io::ErrorKind::ConnectionRefused)),
            });
        }
        let broken = state.broken_on_connect > 0;
        if broken {
            state.broken_on_connect -= 1;
        }
        state.open += 1;
        Ok(MockConnection {
            id: state.connects.len(),
            broken,
            state: Arc::clone(&self.state),
        })
    }
}

/// Connection produced by [`MockConnector`].
pub struct MockConnection {
    id: usize,
    broken: bool,
    state: Arc<Mutex<MockState>>,
}

impl Connection for MockConnection {
    fn send(&mut self, command: &Command) -> Result<Reply, Error> {
        assert!(!self.broken, "send on a broken connection");
        let mut state = self.state.lock().unwrap();
        state.sent.push((self.id, command.to_string()));
        match state.script.pop_front() {
            None => Ok(Reply::status("OK")),
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::Transport) => {
                self.broken = true;
                Err(Error::transport(std::io::Error::from(
                    std::io::ErrorKind::ConnectionReset,
                )))
            }
            Some(Scripted::NoReply) => Err(Error::transport("unexpected end of reply")),
        }
    }

    fn is_broken(&self) -> bool {
        self.broken
    }
}

impl Drop for MockConnection {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.open -= 1;
        }
    }
}

/// A fresh session over a new mock connector, with default configuration.
pub fn session() -> (vredis::Session<MockConnector>, MockConnector) {
    let connector = MockConnector::new();
    let session = vredis::Session::new(connector.clone(), SharedConfig::default());
    (session, connector)
}

/// Request identities for tests.
pub fn request(sequence: u64) -> RequestId {
    RequestId::new(sequence, 1)
}
