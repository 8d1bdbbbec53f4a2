pub mod api;

use crate::cli::Args;
use crate::reply::ReplyStrategy;
use std::error::Error;
use std::sync::Arc;

pub struct Server {
    addr: String,
    strategy: Arc<dyn ReplyStrategy>,
    args: Args,
}

impl Server {
    pub fn new(
        addr: String,
        strategy: Arc<dyn ReplyStrategy>,
        args: Args,
    ) -> Self {
        Self {
            addr,
            strategy,
            args,
        }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        api::start_http_server(
            &self.addr,
            self.strategy.clone(),
            &self.args,
        ).await
    }
}
