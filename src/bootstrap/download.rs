use super::ScriptSource;
use crate::error::{AgentOsError, Result};
use crate::version;
use reqwest::StatusCode;
use std::time::Duration;

/// Downloads scripts over HTTP(S) with a blocking client
pub struct HttpScriptSource {
    client: reqwest::blocking::Client,
}

impl HttpScriptSource {
    /// Build a client. `timeout` of `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("{}/{}", version::PKG_NAME, version::VERSION))
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

impl ScriptSource for HttpScriptSource {
    /// GET `url`; anything but `200 OK` is a download failure
    fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AgentOsError::DownloadFailed(status.as_u16()));
        }

        Ok(response.text()?)
    }
}
