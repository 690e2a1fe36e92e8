mod single_request;
pub use single_request::RestInvoker;

mod batch_request;
pub use batch_request::{BatchPolicy, execute_batched, partition};
