// Test-only global allocator that can be told to fail on the current thread.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

struct FailAlloc;

#[global_allocator]
static GLOBAL: FailAlloc = FailAlloc;

thread_local! {
    // None: never fail. Some(n): n more allocations succeed, then all fail.
    static BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

fn take_budget() -> bool {
    BUDGET
        .try_with(|budget| match budget.get() {
            None => true,
            Some(0) => false,
            Some(n) => {
                budget.set(Some(n - 1));
                true
            }
        })
        .unwrap_or(true)
}

fn track(delta: isize) {
    let _ = LIVE.try_with(|live| live.set(live.get() + delta));
}

unsafe impl GlobalAlloc for FailAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if !take_budget() {
            return std::ptr::null_mut();
        }
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            track(1);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        track(-1);
        System.dealloc(ptr, layout)
    }
}

/// Runs `f` with only `budget` allocations allowed on this thread.
///
/// Returns the result of `f` and how many allocations it left live.
pub(crate) fn with_budget<R>(budget: usize, f: impl FnOnce() -> R) -> (R, isize) {
    let before = LIVE.with(Cell::get);
    BUDGET.with(|b| b.set(Some(budget)));
    let ret = f();
    BUDGET.with(|b| b.set(None));
    (ret, LIVE.with(Cell::get) - before)
}
