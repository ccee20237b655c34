//! Queue operations over nullable handles; an absent queue is `None`.

use crate::error::{QueueError, Result};
use crate::queue::StrQueue;

use std::alloc::Layout;

pub fn create() -> Result<Box<StrQueue>> {
    let layout = Layout::new::<StrQueue>();
    let ptr = unsafe { std::alloc::alloc(layout) } as *mut StrQueue;
    if ptr.is_null() {
        log::warn!("queue allocation failed ({} bytes)", layout.size());
        return Err(QueueError::Allocation);
    }
    unsafe {
        ptr.write(StrQueue::new());
        Ok(Box::from_raw(ptr))
    }
}

pub fn destroy(q: Option<Box<StrQueue>>) {
    drop(q)
}

pub fn insert_head(q: Option<&mut StrQueue>, s: &str) -> Result<()> {
    q.ok_or(QueueError::Allocation)?.insert_head(s)
}

pub fn insert_tail(q: Option<&mut StrQueue>, s: &str) -> Result<()> {
    q.ok_or(QueueError::Allocation)?.insert_tail(s)
}

pub fn remove_head(q: Option<&mut StrQueue>, buf: Option<&mut [u8]>) -> Result<()> {
    match q {
        Some(q) => q.remove_head(buf),
        None => {
            log::debug!("remove from absent queue");
            Err(QueueError::Empty)
        }
    }
}

pub fn size(q: Option<&StrQueue>) -> usize {
    q.map_or(0, StrQueue::len)
}

pub fn reverse(q: Option<&mut StrQueue>) {
    if let Some(q) = q {
        q.reverse()
    }
}

pub fn sort(q: Option<&mut StrQueue>) {
    if let Some(q) = q {
        q.sort()
    }
}
