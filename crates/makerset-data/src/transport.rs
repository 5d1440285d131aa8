//! Blocking HTTP transport behind an async seam.

use async_trait::async_trait;
use std::io::Read;
use std::time::Duration;
use tracing::debug;

use crate::request::Request;
use crate::response::Response;
use crate::FetchError;

/// Sends one request and returns whatever the server answered.
///
/// Non-2xx statuses are returned as responses, not errors; only failures to
/// get a response at all are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, FetchError>;
}

/// [`Transport`] backed by a `ureq` agent, run on the blocking pool.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Build an agent with the given connect and read timeouts.
    pub fn new(connect_timeout: Duration, read_timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(connect_timeout)
            .timeout_read(read_timeout)
            .timeout_write(read_timeout)
            .build();
        Self { agent }
    }

    fn send_blocking(agent: &ureq::Agent, request: Request) -> Result<Response, FetchError> {
        let mut req = agent.request(request.method.as_str(), &request.url);
        for (key, value) in &request.headers {
            req = req.set(key, value);
        }

        let result = match &request.body {
            Some(body) => req.send_bytes(body),
            None => req.call(),
        };

        match result {
            Ok(resp) => into_response(resp),
            Err(ureq::Error::Status(_, resp)) => into_response(resp),
            Err(ureq::Error::Transport(err)) => Err(match err.kind() {
                ureq::ErrorKind::InvalidUrl | ureq::ErrorKind::UnknownScheme => {
                    FetchError::Request(err.to_string())
                }
                _ => FetchError::Connection(err.to_string()),
            }),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), Duration::from_secs(10))
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        debug!(method = request.method.as_str(), url = %request.url, "Sending request");
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || Self::send_blocking(&agent, request))
            .await
            .map_err(|e| FetchError::Request(format!("request task failed: {e}")))?
    }
}

fn into_response(resp: ureq::Response) -> Result<Response, FetchError> {
    let status = resp.status();
    let headers: Vec<(String, String)> = resp
        .headers_names()
        .into_iter()
        .filter_map(|name| {
            let value = resp.header(&name)?.to_string();
            Some((name, value))
        })
        .collect();

    let mut body = Vec::new();
    resp.into_reader()
        .read_to_end(&mut body)
        .map_err(|e| FetchError::Connection(format!("failed to read body: {e}")))?;

    Ok(Response::new(status, headers, body))
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted transport: replays queued outcomes and records every request.
    #[derive(Default)]
    pub struct MockTransport {
        outcomes: Mutex<VecDeque<Result<Response, FetchError>>>,
        pub requests: Mutex<Vec<Request>>,
        pub delay: Option<Duration>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, status: u16, body: &str) -> Self {
            self.push(Ok(Response::new(status, Vec::new(), body.as_bytes().to_vec())))
        }

        pub fn fail(self, error: FetchError) -> Self {
            self.push(Err(error))
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn push(self, outcome: Result<Response, FetchError>) -> Self {
            self.outcomes.lock().unwrap().push_back(outcome);
            self
        }

        pub fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub fn last_request(&self) -> Request {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, request: Request) -> Result<Response, FetchError> {
            self.requests.lock().unwrap().push(request);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::Connection("no scripted response".into())))
        }
    }
}
