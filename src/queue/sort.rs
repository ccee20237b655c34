use super::node::Node;

use std::ptr::NonNull;

type Link = NonNull<Node>;

// cond: head starts a None-terminated chain of exactly len >= 1 nodes
// returns the new (head, tail)
pub(crate) unsafe fn merge_sort(head: Link, len: usize) -> (Link, Link) {
    if len == 1 {
        return (head, head);
    }

    let (left, right) = split(head);
    let left = merge_sort(left, len / 2);
    let right = merge_sort(right, len - len / 2);
    merge(left, right)
}

// cond: the chain has at least two nodes
// the left half gets floor(len / 2) nodes
unsafe fn split(head: Link) -> (Link, Link) {
    let mut prev = head;
    let mut slow = head;
    let mut fast = Some(head);

    while let Some(f) = fast {
        let after = match f.as_ref().next {
            Some(after) => after,
            None => break,
        };
        prev = slow;
        slow = match slow.as_ref().next {
            Some(next) => next,
            None => break,
        };
        fast = after.as_ref().next;
    }

    (*prev.as_ptr()).next = None;
    (head, slow)
}

// Ties take from `left` first.
// cond: both runs are sorted and None-terminated at their tails
unsafe fn merge(
    (left, left_tail): (Link, Link),
    (right, right_tail): (Link, Link),
) -> (Link, Link) {
    let (head, mut left, mut right) = if left.as_ref().value <= right.as_ref().value {
        (left, left.as_ref().next, Some(right))
    } else {
        (right, Some(left), right.as_ref().next)
    };
    let mut tail = head;

    loop {
        match (left, right) {
            (Some(l), Some(r)) => {
                let next = if l.as_ref().value <= r.as_ref().value {
                    left = l.as_ref().next;
                    l
                } else {
                    right = r.as_ref().next;
                    r
                };
                (*tail.as_ptr()).next = Some(next);
                tail = next;
            }
            (Some(rest), None) => {
                (*tail.as_ptr()).next = Some(rest);
                tail = left_tail;
                break;
            }
            (None, Some(rest)) => {
                (*tail.as_ptr()).next = Some(rest);
                tail = right_tail;
                break;
            }
            (None, None) => break,
        }
    }

    (head, tail)
}

#[cfg(test)]
mod test {
    use super::{merge, merge_sort, split, Link};
    use crate::queue::node::Node;

    fn chain(values: &[&str]) -> Link {
        let mut head: Option<Link> = None;
        for v in values.iter().rev() {
            let mut node = Node::alloc(v).unwrap();
            unsafe { node.as_mut().next = head };
            head = Some(node);
        }
        head.unwrap()
    }

    fn collect(head: Link) -> Vec<String> {
        let mut out = Vec::new();
        let mut cur = Some(head);
        while let Some(ptr) = cur {
            unsafe {
                cur = ptr.as_ref().next;
                out.push(Node::consume(ptr).into_string());
            }
        }
        out
    }

    #[test]
    fn test_split() {
        for n in 2..=7 {
            let values: Vec<String> = (0..n).map(|i| i.to_string()).collect();
            let refs: Vec<&str> = values.iter().map(String::as_str).collect();
            let (left, right) = unsafe { split(chain(&refs)) };
            let left = collect(left);
            let right = collect(right);
            assert_eq!(left.len(), n / 2);
            assert_eq!(right.len(), n - n / 2);
            assert_eq!([left, right].concat(), values);
        }
    }

    #[test]
    fn test_merge_sort() {
        let values = ["pear", "fig", "apple", "kiwi", "date"];
        let (head, tail) = unsafe { merge_sort(chain(&values), values.len()) };
        unsafe {
            assert_eq!(&*tail.as_ref().value, "pear");
            assert!(tail.as_ref().next.is_none());
        }
        assert_eq!(collect(head), ["apple", "date", "fig", "kiwi", "pear"]);
    }

    #[test]
    fn test_merge_sort_single() {
        let head = chain(&["only"]);
        let (h, t) = unsafe { merge_sort(head, 1) };
        assert_eq!(h, head);
        assert_eq!(t, head);
        assert_eq!(collect(h), ["only"]);
    }

    #[test]
    fn test_merge_tail() {
        let left = chain(&["a", "x", "y"]);
        let right = chain(&["b", "c"]);
        unsafe {
            let left_tail = left.as_ref().next.unwrap().as_ref().next.unwrap();
            let right_tail = right.as_ref().next.unwrap();

            let (head, tail) = merge((left, left_tail), (right, right_tail));
            assert_eq!(tail, left_tail);
            assert!(tail.as_ref().next.is_none());
            assert_eq!(collect(head), ["a", "b", "c", "x", "y"]);
        }

        let left = chain(&["m"]);
        let right = chain(&["a", "z"]);
        unsafe {
            let right_tail = right.as_ref().next.unwrap();
            let (head, tail) = merge((left, left), (right, right_tail));
            assert_eq!(tail, right_tail);
            assert_eq!(collect(head), ["a", "m", "z"]);
        }
    }
}
