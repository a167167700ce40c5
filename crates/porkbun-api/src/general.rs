// General endpoints: ping and TLD pricing

use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::cache::PricingTable;
use crate::client::PorkbunClient;
use crate::error::Error;
use crate::models::{PingResponse, PricingResponse};

impl PorkbunClient {
    /// Verify the credentials and return the public IP the API saw.
    ///
    /// `POST ping`
    pub async fn ping(&self, cancel: &CancellationToken) -> Result<String, Error> {
        let response: PingResponse = self.call(&["ping"], None, cancel).await?;
        Ok(response.your_ip)
    }

    /// Registration, renewal and transfer prices for every TLD.
    ///
    /// `POST pricing/get` once per client; later calls hit the cache.
    pub async fn get_pricing(&self, cancel: &CancellationToken) -> Result<PricingTable, Error> {
        if let Some(pricing) = self.cache().pricing() {
            trace!("pricing cache hit");
            return Ok(pricing);
        }

        let response: PricingResponse = self.call(&["pricing", "get"], None, cancel).await?;
        let pricing = response.pricing.unwrap_or_default();
        self.cache().put_pricing(pricing.clone());
        Ok(pricing)
    }
}
