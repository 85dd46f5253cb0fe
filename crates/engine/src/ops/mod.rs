use std::sync::Arc;

use sea_orm::{ActiveValue, DatabaseConnection, Value};

use crate::{Collection, Currency, Invalidation, LogInvalidation, ResultEngine};

mod alerts;
mod budgets;
mod goals;
mod insights;
mod transactions;
mod users;

pub use insights::{Finances, Trends};
pub use transactions::TransactionOutcome;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    currency: Currency,
    invalidation: Arc<dyn Invalidation>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Currency used to format alert messages.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    fn notify(&self, user_id: &str, collections: &[Collection]) {
        self.invalidation.invalidate(user_id, collections);
    }
}

/// `Set` for provided patch fields, `NotSet` otherwise.
fn patch_value<T: Into<Value>>(value: Option<T>) -> ActiveValue<T> {
    match value {
        Some(value) => ActiveValue::Set(value),
        None => ActiveValue::NotSet,
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    currency: Currency,
    invalidation: Option<Arc<dyn Invalidation>>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    pub fn currency(mut self, currency: Currency) -> EngineBuilder {
        self.currency = currency;
        self
    }

    /// Sink for stale-view signals. Defaults to [`LogInvalidation`].
    pub fn invalidation(mut self, invalidation: Arc<dyn Invalidation>) -> EngineBuilder {
        self.invalidation = Some(invalidation);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            currency: self.currency,
            invalidation: self
                .invalidation
                .unwrap_or_else(|| Arc::new(LogInvalidation)),
        })
    }
}
