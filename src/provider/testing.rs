//! Scripted `ManagementApi` for unit tests.
//!
//! Each channel replays its script in order and then keeps repeating the last
//! reply, which models a remote that has settled.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use paths::ManagementOperation;
use serde_json::Value;

use crate::model::{ConfigCategory, ServiceName};
use crate::provider::{read_operation, write_operation, ApiResponse, ManagementApi, ProviderError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Channel {
    Read(ConfigCategory),
    Write(ConfigCategory),
    Project,
    Health,
}

impl Channel {
    fn operation(self) -> ManagementOperation {
        match self {
            Channel::Read(category) => read_operation(category),
            Channel::Write(category) => write_operation(category),
            Channel::Project => ManagementOperation::GetProject,
            Channel::Health => ManagementOperation::GetServicesHealth,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Respond(ApiResponse),
    Fail(&'static str),
}

pub(crate) fn json(status: u16, body: &Value) -> Reply {
    Reply::Respond(ApiResponse::json(status, body))
}

pub(crate) fn status_only(status: u16) -> Reply {
    Reply::Respond(ApiResponse::new(status, Vec::new()))
}

#[derive(Debug, Default)]
pub(crate) struct ScriptedApi {
    scripts: Mutex<HashMap<Channel, VecDeque<Reply>>>,
    calls: Mutex<HashMap<Channel, usize>>,
    writes: Mutex<Vec<(ConfigCategory, Value)>>,
    health_requests: Mutex<Vec<Vec<ServiceName>>>,
}

impl ScriptedApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn script(self, channel: Channel, replies: impl IntoIterator<Item = Reply>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(channel)
            .or_default()
            .extend(replies);
        self
    }

    pub(crate) fn calls(&self, channel: Channel) -> usize {
        self.calls.lock().unwrap().get(&channel).copied().unwrap_or(0)
    }

    pub(crate) fn total_writes(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    pub(crate) fn written(&self) -> Vec<(ConfigCategory, Value)> {
        self.writes.lock().unwrap().clone()
    }

    pub(crate) fn health_requests(&self) -> Vec<Vec<ServiceName>> {
        self.health_requests.lock().unwrap().clone()
    }

    fn next(&self, channel: Channel) -> Result<ApiResponse, ProviderError> {
        *self.calls.lock().unwrap().entry(channel).or_default() += 1;

        let mut scripts = self.scripts.lock().unwrap();
        let reply = match scripts.get_mut(&channel) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(ProviderError::request(
                channel.operation(),
                std::io::Error::other(message),
            )),
            None => Ok(ApiResponse::new(500, format!("no script for {channel:?}"))),
        }
    }
}

#[async_trait]
impl ManagementApi for ScriptedApi {
    async fn read_settings(
        &self,
        _project_ref: &str,
        category: ConfigCategory,
    ) -> Result<ApiResponse, ProviderError> {
        self.next(Channel::Read(category))
    }

    async fn write_settings(
        &self,
        _project_ref: &str,
        category: ConfigCategory,
        body: &Value,
    ) -> Result<ApiResponse, ProviderError> {
        self.writes.lock().unwrap().push((category, body.clone()));
        self.next(Channel::Write(category))
    }

    async fn project_status(&self, _project_ref: &str) -> Result<ApiResponse, ProviderError> {
        self.next(Channel::Project)
    }

    async fn services_health(
        &self,
        _project_ref: &str,
        services: &[ServiceName],
    ) -> Result<ApiResponse, ProviderError> {
        self.health_requests.lock().unwrap().push(services.to_vec());
        self.next(Channel::Health)
    }
}
