mod node;
mod sort;
mod str_queue;

pub use self::str_queue::{IntoIter, Iter, StrQueue};
