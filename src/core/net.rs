// src/core/net.rs
// One conversation = one blocking client with its own cookie jar.
//
// The remote flow tracks which step a session is on, so a conversation is
// opened, used for exactly one submission, and dropped. `submit` takes
// `self`; there is no way to submit twice or to hand the same session to
// two tasks.

use reqwest::{
    blocking::{Client, Response},
    header::ACCEPT,
    redirect::Policy,
};
use url::Url;

use super::form::{self, Control, SubmissionTarget};
use super::html::{self, Document};
use crate::config::{consts::ACCEPT_HTML, options::FlowOptions};
use crate::error::{Error, Result};

pub struct Conversation {
    client: Client,
    base: Url,
}

impl Conversation {
    /// Open a fresh session and walk it to the listing.
    ///
    /// 1. new cookie jar
    /// 2. entry page, best-effort (some deployments skip it)
    /// 3. listing page; its hidden state and controls belong to this session only
    /// 4. the listing form's action
    pub fn open(flow: &FlowOptions) -> Result<(Self, Document, SubmissionTarget)> {
        let (conversation, listing) = Self::start(flow)?;

        let form_sel = html::selector(&flow.form_selector)?;
        let target = form::submission_target(&listing, &form_sel)?;
        logd!(action = target.as_str(), "listing fetched");

        Ok((conversation, listing, target))
    }

    /// Steps 1 to 3 of [`Conversation::open`]: the listing, whatever its forms look like.
    pub fn start(flow: &FlowOptions) -> Result<(Self, Document)> {
        let conversation = Self {
            client: build_client(flow)?,
            base: Url::parse(&flow.base_url)?,
        };

        if let Err(e) = conversation.get(&flow.entry_url) {
            logw!("entry page not reached, continuing: {e}");
        }

        let body = conversation.get(&flow.list_url)?;
        Ok((conversation, Document::parse(&body)))
    }

    /// Press `control` on `listing` and return the resulting page.
    /// Consumes the conversation: its server-side step has moved on.
    pub fn submit(
        self,
        listing: &Document,
        target: &SubmissionTarget,
        control: &Control,
    ) -> Result<Document> {
        let url = self.base.join(target.as_str())?;
        let payload = form::build_payload(listing, control);
        logd!(%url, control = control.name(), fields = payload.len(), "submitting selection");

        let resp = self
            .client
            .post(url.clone())
            .header(ACCEPT, ACCEPT_HTML)
            .form(&payload)
            .send()
            .map_err(|e| Error::submission(url.as_str(), e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Submission {
                url: s!(url.as_str()),
                reason: format!("status {}", status.as_u16()),
            });
        }

        let body = resp.text().map_err(|e| Error::submission(url.as_str(), e))?;
        Ok(Document::parse(&body))
    }

    fn get(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_HTML)
            .send()
            .map_err(|e| Error::fetch(url, e))?;
        read_ok(url, resp)
    }
}

fn build_client(flow: &FlowOptions) -> Result<Client> {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::limited(flow.max_redirects))
        .user_agent(flow.user_agent.as_str())
        .timeout(flow.timeout())
        .build()
        .map_err(Error::Client)
}

fn read_ok(url: &str, resp: Response) -> Result<String> {
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::FetchStatus { url: s!(url), status: status.as_u16() });
    }
    resp.text().map_err(|e| Error::fetch(url, e))
}
