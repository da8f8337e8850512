//! Typed entities.

mod budget;
mod financial_transaction;
mod sales_order;
mod subscription;

pub use budget::{Budget, BudgetUpdate};
pub use financial_transaction::{
    FinancialTransaction, FinancialTransactionUpdate, TransactionLine, TransactionLineUpdate,
};
pub use sales_order::{SalesOrder, SalesOrderUpdate};
pub use subscription::{SubscriptionType, SubscriptionTypeUpdate};
