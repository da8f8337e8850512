use std::sync::Arc;

use exact_online_client::{ClientConfig, ExactConfig, TokenProvider};
use exact_online_rest::{
    Budget, Entity, ExactRestClient, FinancialTransaction, ResourceClient, Result, SalesOrder,
    SubscriptionType, TransactionLine,
};

/// Entry point bundling one resource client per supported collection.
///
/// All resource clients share a single transport and token provider.
#[derive(Debug, Clone)]
pub struct ExactOnline {
    rest: ExactRestClient,
}

impl ExactOnline {
    /// Connect to a division with the default transport settings.
    pub fn new(config: ExactConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        Ok(Self {
            rest: ExactRestClient::new(config, tokens)?,
        })
    }

    /// Connect with custom transport settings.
    pub fn with_http_config(
        config: ExactConfig,
        tokens: Arc<dyn TokenProvider>,
        http_config: ClientConfig,
    ) -> Result<Self> {
        Ok(Self {
            rest: ExactRestClient::with_http_config(config, tokens, http_config)?,
        })
    }

    /// The REST client, for resources without a dedicated accessor.
    pub fn rest(&self) -> &ExactRestClient {
        &self.rest
    }

    /// Division (administration) number.
    pub fn division(&self) -> i32 {
        self.rest.division()
    }

    /// Client for any entity type, including ones defined outside this crate.
    pub fn resource<E: Entity>(&self) -> ResourceClient<E> {
        self.rest.resource()
    }

    /// `subscription/SubscriptionTypes`.
    pub fn subscription_types(&self) -> ResourceClient<SubscriptionType> {
        self.resource()
    }

    /// `budget/Budgets`.
    pub fn budgets(&self) -> ResourceClient<Budget> {
        self.resource()
    }

    /// `salesorder/SalesOrders`.
    pub fn sales_orders(&self) -> ResourceClient<SalesOrder> {
        self.resource()
    }

    /// `financialtransaction/Transactions`.
    pub fn financial_transactions(&self) -> ResourceClient<FinancialTransaction> {
        self.resource()
    }

    /// `financialtransaction/TransactionLines`.
    pub fn transaction_lines(&self) -> ResourceClient<TransactionLine> {
        self.resource()
    }
}
