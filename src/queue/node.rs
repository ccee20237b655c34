use crate::error::{QueueError, Result};

use std::alloc::Layout;
use std::ptr::NonNull;

pub(crate) struct Node {
    pub(crate) value: Box<str>,
    pub(crate) next: Option<NonNull<Node>>,
}

impl Node {
    pub(crate) fn alloc(s: &str) -> Result<NonNull<Self>> {
        let layout = Layout::new::<Node>();
        let ptr = unsafe { std::alloc::alloc(layout) } as *mut Node;
        let ptr = match NonNull::new(ptr) {
            Some(ptr) => ptr,
            None => {
                log::warn!("node allocation failed ({} bytes)", layout.size());
                return Err(QueueError::Allocation);
            }
        };

        match copy_payload(s) {
            Ok(value) => {
                unsafe { ptr.as_ptr().write(Self { value, next: None }) };
                Ok(ptr)
            }
            Err(e) => {
                unsafe { Node::dealloc(ptr) };
                Err(e)
            }
        }
    }

    // cond: the node has been read out or dropped in place
    pub(crate) unsafe fn dealloc(ptr: NonNull<Self>) {
        let layout = Layout::new::<Node>();
        std::alloc::dealloc(ptr.as_ptr() as *mut u8, layout);
    }

    // cond: ptr is detached from every chain
    pub(crate) unsafe fn consume(ptr: NonNull<Self>) -> Box<str> {
        let node = ptr.as_ptr().read();
        Node::dealloc(ptr);
        node.value
    }

    // cond: ptr is detached from every chain
    pub(crate) unsafe fn release(ptr: NonNull<Self>) {
        std::ptr::drop_in_place(&mut (*ptr.as_ptr()).value);
        Node::dealloc(ptr);
    }
}

fn copy_payload(s: &str) -> Result<Box<str>> {
    let mut buf = String::new();
    if buf.try_reserve_exact(s.len()).is_err() {
        log::warn!("payload allocation failed ({} bytes)", s.len());
        return Err(QueueError::Allocation);
    }
    buf.push_str(s);
    Ok(buf.into_boxed_str())
}

// a zero-length dst has no room for the terminator and is left untouched
pub(crate) fn copy_truncated(dst: &mut [u8], src: &str) -> usize {
    let cap = match dst.len().checked_sub(1) {
        Some(cap) => cap,
        None => return 0,
    };
    let n = src.len().min(cap);
    dst[..n].copy_from_slice(&src.as_bytes()[..n]);
    dst[n] = 0;
    if n < src.len() {
        log::debug!("payload truncated from {} to {} bytes", src.len(), n);
    }
    n
}
