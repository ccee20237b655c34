use super::node::{self, Node};
use super::sort;
use crate::error::{QueueError, Result};

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

// Singly linked queue of owned strings
pub struct StrQueue {
    head: Option<NonNull<Node>>,
    tail: Option<NonNull<Node>>,
    len: usize,
    // invariant: len == 0 <=> head.is_none() <=> tail.is_none()
    // invariant: tail is the only node whose next is None
}

unsafe impl Send for StrQueue {}
unsafe impl Sync for StrQueue {}

impl StrQueue {
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn front(&self) -> Option<&str> {
        self.head.map(|ptr| unsafe { &*(*ptr.as_ptr()).value })
    }

    pub fn back(&self) -> Option<&str> {
        self.tail.map(|ptr| unsafe { &*(*ptr.as_ptr()).value })
    }

    pub fn insert_head(&mut self, s: &str) -> Result<()> {
        let mut node_ptr = Node::alloc(s)?;
        unsafe { node_ptr.as_mut().next = self.head };
        if self.tail.is_none() {
            self.tail = Some(node_ptr);
        }
        self.head = Some(node_ptr);
        self.len += 1;
        Ok(())
    }

    pub fn insert_tail(&mut self, s: &str) -> Result<()> {
        let node_ptr = Node::alloc(s)?;
        match self.tail {
            Some(tail_ptr) => unsafe { (*tail_ptr.as_ptr()).next = Some(node_ptr) },
            None => self.head = Some(node_ptr),
        }
        self.tail = Some(node_ptr);
        self.len += 1;
        Ok(())
    }

    /// Copies at most `buf.len() - 1` bytes of the head payload plus a zero
    /// terminator into `buf`, then releases the head. Longer payloads are truncated.
    pub fn remove_head(&mut self, buf: Option<&mut [u8]>) -> Result<()> {
        let head_ptr = match self.head {
            Some(ptr) => ptr,
            None => {
                log::debug!("remove from empty queue");
                return Err(QueueError::Empty);
            }
        };

        if let Some(buf) = buf {
            node::copy_truncated(buf, unsafe { &(*head_ptr.as_ptr()).value });
        }

        self.unlink_head(head_ptr);
        unsafe { Node::release(head_ptr) };
        Ok(())
    }

    pub fn pop_front(&mut self) -> Option<Box<str>> {
        let head_ptr = self.head?;
        self.unlink_head(head_ptr);
        Some(unsafe { Node::consume(head_ptr) })
    }

    // cond: head_ptr == self.head
    fn unlink_head(&mut self, head_ptr: NonNull<Node>) {
        self.head = unsafe { head_ptr.as_ref().next };
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;
    }

    pub fn clear(&mut self) {
        let mut cur = self.head.take();
        self.tail = None;
        self.len = 0;
        while let Some(ptr) = cur {
            unsafe {
                cur = ptr.as_ref().next;
                Node::release(ptr);
            }
        }
    }

    pub fn reverse(&mut self) {
        if self.len <= 1 {
            return;
        }
        log::trace!("reverse {} elements", self.len);

        let mut prev: Option<NonNull<Node>> = None;
        let mut cur = self.head;
        while let Some(ptr) = cur {
            unsafe {
                let next = ptr.as_ref().next;
                (*ptr.as_ptr()).next = prev;
                prev = Some(ptr);
                cur = next;
            }
        }

        std::mem::swap(&mut self.head, &mut self.tail);
    }

    // stable, byte-wise ascending; nodes are relinked, never copied
    pub fn sort(&mut self) {
        if self.len <= 1 {
            return;
        }
        log::trace!("sort {} elements", self.len);

        if let Some(head_ptr) = self.head {
            let (head, tail) = unsafe { sort::merge_sort(head_ptr, self.len) };
            self.head = Some(head);
            self.tail = Some(tail);
        }
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            cur: self.head,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl Default for StrQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StrQueue {
    fn drop(&mut self) {
        if self.len > 0 {
            log::trace!("release {} elements", self.len);
        }
        self.clear()
    }
}

impl fmt::Debug for StrQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// ------------------------------------------
// begin: IntoIter

pub struct IntoIter(StrQueue);

impl Iterator for IntoIter {
    type Item = Box<str>;
    fn next(&mut self) -> Option<Box<str>> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl IntoIterator for StrQueue {
    type Item = Box<str>;
    type IntoIter = IntoIter;
    fn into_iter(self) -> IntoIter {
        IntoIter(self)
    }
}

impl ExactSizeIterator for IntoIter {
    fn len(&self) -> usize {
        self.0.len
    }
}

impl FusedIterator for IntoIter {}

// end: IntoIter
// ------------------------------------------

// ------------------------------------------
// begin: Iter

pub struct Iter<'a> {
    cur: Option<NonNull<Node>>,
    len: usize,
    _marker: PhantomData<&'a StrQueue>,
}

unsafe impl Send for Iter<'_> {}
unsafe impl Sync for Iter<'_> {}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;
    fn next(&mut self) -> Option<&'a str> {
        let ptr = self.cur?;
        unsafe {
            let node = &*ptr.as_ptr();
            self.cur = node.next;
            self.len -= 1;
            Some(&*node.value)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a> IntoIterator for &'a StrQueue {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl ExactSizeIterator for Iter<'_> {
    fn len(&self) -> usize {
        self.len
    }
}

impl FusedIterator for Iter<'_> {}

// end: Iter
// ------------------------------------------

#[cfg(test)]
impl StrQueue {
    pub(crate) fn check_invariants(&self) {
        assert_eq!(self.len == 0, self.head.is_none());
        assert_eq!(self.len == 0, self.tail.is_none());

        let mut count = 0;
        let mut last = None;
        let mut cur = self.head;
        while let Some(ptr) = cur {
            count += 1;
            assert!(count <= self.len, "chain longer than len");
            last = Some(ptr);
            cur = unsafe { ptr.as_ref().next };
        }
        assert_eq!(count, self.len);
        assert_eq!(last, self.tail);
    }
}
