//! painel-core: transaction data model, aggregation, and the conversation log

pub mod aggregate;
pub mod conversation;
pub mod model;

pub use aggregate::{daily_series, flow_comparison, summarize, DailyPoint, DailySeries, FlowComparison, Summary};
pub use conversation::{Conversation, ConversationEntry};
pub use model::{Amount, Dataset, Transaction, DATE_COLUMN, VALUE_COLUMN};
