use std::fmt;
use std::io::Write;
use std::process::ExitCode;

use derive_builder::Builder;

use crate::request::{PageRequest, DEFAULT_BASE_URL};
use crate::transport::Transport;

#[derive(Debug, Clone, Builder)]
pub struct ContestPageFetcher {
    #[builder(setter(into), default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
}

/// Why a contest page could not be obtained.
#[derive(Debug)]
pub enum FetchError {
    /// The server answered with something other than 200.
    Status(u16),
    /// No status was obtained: DNS, connect, TLS, timeout or body read failed.
    Transport(anyhow::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Status(status) => write!(f, "unexpected status {status}"),
            FetchError::Transport(err) => write!(f, "transport failure: {err:#}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Terminal state of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Printed,
    Rejected { status: u16 },
    TransportFailed,
    OutputFailed,
}

impl Outcome {
    pub fn code(&self) -> u8 {
        match self {
            Outcome::Printed => 0,
            Outcome::Rejected { .. } | Outcome::TransportFailed | Outcome::OutputFailed => 1,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.code())
    }
}

impl ContestPageFetcher {
    pub fn request(&self, contest_id: &str) -> PageRequest {
        PageRequest::new(&self.base_url, contest_id)
    }

    /// Issues exactly one GET and returns the body of a 200 response.
    pub async fn fetch<T: Transport>(
        &self,
        transport: &T,
        contest_id: &str,
    ) -> Result<String, FetchError> {
        let req = self.request(contest_id);
        tracing::debug!(url = %req.url, "fetching contest page");

        let res = transport
            .send(&req)
            .await
            .map_err(FetchError::Transport)?;

        if res.status != 200 {
            return Err(FetchError::Status(res.status));
        }
        Ok(res.body)
    }

    /// Fetches the page and writes its body plus a newline to `out`.
    /// Nothing is written unless the response status is 200.
    pub async fn print<T: Transport, W: Write>(
        &self,
        transport: &T,
        contest_id: &str,
        out: &mut W,
    ) -> Outcome {
        let body = match self.fetch(transport, contest_id).await {
            Ok(body) => body,
            Err(FetchError::Status(status)) => {
                tracing::info!(contest_id, status, "contest page not available");
                return Outcome::Rejected { status };
            }
            Err(err) => {
                tracing::info!(contest_id, error = %err, "contest page request failed");
                return Outcome::TransportFailed;
            }
        };

        if let Err(err) = writeln!(out, "{}", body).and_then(|_| out.flush()) {
            tracing::warn!(error = %err, "failed to write contest page");
            return Outcome::OutputFailed;
        }
        Outcome::Printed
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use anyhow::{anyhow, Result};

    use super::*;
    use crate::request::PageResponse;

    /// Replays scripted results and records every request it sees.
    struct MockTransport {
        replies: Mutex<VecDeque<Result<PageResponse>>>,
        seen: Mutex<Vec<PageRequest>>,
    }

    impl MockTransport {
        fn new(replies: Vec<Result<PageResponse>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                seen: Mutex::default(),
            }
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    impl Transport for MockTransport {
        async fn send(&self, request: &PageRequest) -> Result<PageResponse> {
            self.seen.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(anyhow!("no scripted reply")))
        }
    }

    fn reply(status: u16, body: &str) -> Result<PageResponse> {
        Ok(PageResponse {
            status,
            body: body.to_string(),
        })
    }

    fn fetcher() -> ContestPageFetcher {
        ContestPageFetcherBuilder::default().build().unwrap()
    }

    #[test]
    fn builder_should_default_to_codeforces() {
        let req = fetcher().request("2000");
        assert_eq!(req.url, "https://codeforces.com/contest/2000");

        let fetcher = ContestPageFetcherBuilder::default()
            .base_url("http://localhost:3000")
            .build()
            .unwrap();
        assert_eq!(fetcher.request("7").url, "http://localhost:3000/contest/7");
    }

    #[tokio::test]
    async fn ok_response_should_print_body() {
        let transport = MockTransport::new(vec![reply(200, "<html>ok</html>")]);
        let mut out = Vec::new();

        let outcome = fetcher().print(&transport, "2000", &mut out).await;

        assert_eq!(outcome, Outcome::Printed);
        assert_eq!(outcome.code(), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "<html>ok</html>\n");

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url, "https://codeforces.com/contest/2000");
    }

    #[tokio::test]
    async fn non_ok_response_should_print_nothing() {
        for status in [404, 500, 201, 302] {
            let transport = MockTransport::new(vec![reply(status, "<html>error</html>")]);
            let mut out = Vec::new();

            let outcome = fetcher().print(&transport, "2000", &mut out).await;

            assert_eq!(outcome, Outcome::Rejected { status });
            assert_eq!(outcome.code(), 1);
            assert!(out.is_empty());
        }
    }

    #[tokio::test]
    async fn transport_failure_should_exit_with_failure() {
        let transport = MockTransport::new(vec![Err(anyhow!("connection refused"))]);
        let mut out = Vec::new();

        let outcome = fetcher().print(&transport, "2000", &mut out).await;

        assert_eq!(outcome, Outcome::TransportFailed);
        assert_eq!(outcome.code(), 1);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn failure_should_not_be_retried() {
        let transport = MockTransport::new(vec![
            Err(anyhow!("connection reset")),
            reply(200, "<html>ok</html>"),
        ]);
        let mut out = Vec::new();

        let outcome = fetcher().print(&transport, "2000", &mut out).await;

        assert_eq!(outcome, Outcome::TransportFailed);
        assert_eq!(transport.calls(), 1);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn fetch_should_report_status() {
        let transport = MockTransport::new(vec![reply(403, "")]);
        let err = fetcher().fetch(&transport, "1").await.unwrap_err();

        assert!(matches!(err, FetchError::Status(403)));
        assert_eq!(err.to_string(), "unexpected status 403");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn write_failure_should_exit_with_failure() {
        let transport = MockTransport::new(vec![reply(200, "<html>ok</html>")]);

        let outcome = fetcher().print(&transport, "2000", &mut BrokenPipe).await;

        assert_eq!(outcome, Outcome::OutputFailed);
        assert_eq!(outcome.code(), 1);
    }
}
