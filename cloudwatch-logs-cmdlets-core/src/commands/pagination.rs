//! Continuation-token state machine
//!
//! `Start -> FetchPage -> (more tokens? FetchPage : Done)`. An explicit starting
//! token or `no_auto_iteration` limits the run to one page.

use crate::model::PaginationSpec;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageState {
    Start,
    FetchPage,
    Done,
}

#[derive(Debug)]
pub(crate) struct Paginator<'a> {
    spec: Option<&'a PaginationSpec>,
    single_page: bool,
    state: PageState,
    token: Option<String>,
    leftover: Option<String>,
}

impl<'a> Paginator<'a> {
    pub(crate) fn new(
        spec: Option<&'a PaginationSpec>,
        next_token: Option<String>,
        no_auto_iteration: bool,
    ) -> Self {
        let token = next_token.filter(|t| !t.is_empty());
        Self {
            spec,
            single_page: spec.is_none() || no_auto_iteration || token.is_some(),
            state: PageState::Start,
            token,
            leftover: None,
        }
    }

    /// Token to send with the next request, with the request member it belongs in
    pub(crate) fn request_token(&self) -> Option<(&str, &str)> {
        let spec = self.spec?;
        self.token
            .as_deref()
            .map(|token| (spec.input_token.as_str(), token))
    }

    /// True while another page should be fetched
    pub(crate) fn has_next(&self) -> bool {
        self.state != PageState::Done
    }

    /// Record a page's response and decide whether to continue
    pub(crate) fn advance(&mut self, response: &Value) {
        self.state = PageState::FetchPage;

        let Some(spec) = self.spec else {
            self.state = PageState::Done;
            return;
        };

        let next = response
            .get(&spec.output_token)
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        match next {
            None => self.state = PageState::Done,
            // The service hands back the token it was given at the end of a stream
            Some(next) if self.token.as_deref() == Some(next.as_str()) => {
                self.state = PageState::Done;
            }
            Some(next) if self.single_page => {
                self.leftover = Some(next);
                self.state = PageState::Done;
            }
            Some(next) => self.token = Some(next),
        }
    }

    /// Unused continuation token after a single-page run
    pub(crate) fn into_leftover(self) -> Option<String> {
        self.leftover
    }
}
