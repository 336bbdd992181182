//! Per-registration listener bookkeeping

use std::rc::Rc;

/// Callback for a named event. Identity is `Rc` pointer identity: removal
/// and call-count queries require the same `Rc` that was registered.
pub type EventFn<P> = Rc<dyn Fn(&P)>;

/// Callback for the catch-all slot; receives the event name alongside the
/// payload.
pub type AnyFn<E, P> = Rc<dyn Fn(&E, &P)>;

pub(crate) enum Callback<E, P> {
    Named(EventFn<P>),
    Any(AnyFn<E, P>),
}

impl<E, P> Clone for Callback<E, P> {
    fn clone(&self) -> Self {
        match self {
            Self::Named(f) => Self::Named(Rc::clone(f)),
            Self::Any(f) => Self::Any(Rc::clone(f)),
        }
    }
}

impl<E, P> Callback<E, P> {
    pub(crate) fn is_named(&self, other: &EventFn<P>) -> bool {
        match self {
            Self::Named(f) => Rc::ptr_eq(f, other),
            Self::Any(_) => false,
        }
    }

    pub(crate) fn is_any(&self, other: &AnyFn<E, P>) -> bool {
        match self {
            Self::Named(_) => false,
            Self::Any(f) => Rc::ptr_eq(f, other),
        }
    }
}

/// One listener registration.
///
/// `calls` is signed: a negative value is "calls remaining before
/// auto-removal" and increments toward zero, a non-negative value is an
/// unbounded listener's elapsed-call statistic. Both regimes advance by the
/// same `+1` per invocation, so a registration is exhausted exactly when the
/// counter reaches zero after a call.
pub(crate) struct Registration<E, P> {
    pub(crate) id: u64,
    pub(crate) callback: Callback<E, P>,
    pub(crate) calls: i64,
}

impl<E, P> Registration<E, P> {
    /// `count == 0` registers an unbounded listener; any other value fires
    /// that many times and then self-removes.
    pub(crate) fn new(id: u64, callback: Callback<E, P>, count: u32) -> Self {
        Self {
            id,
            callback,
            calls: -i64::from(count),
        }
    }

    pub(crate) fn record_call(&mut self) {
        self.calls += 1;
    }

    /// Only meaningful immediately after [`record_call`]: a fresh unbounded
    /// registration also sits at zero but is never checked before its first
    /// call.
    ///
    /// [`record_call`]: Registration::record_call
    pub(crate) fn exhausted(&self) -> bool {
        self.calls == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Callback<&'static str, ()> {
        Callback::Named(Rc::new(|_: &()| {}))
    }

    #[test]
    fn bounded_counter_runs_toward_zero() {
        let mut reg = Registration::new(0, noop(), 3);
        assert_eq!(reg.calls, -3);

        reg.record_call();
        reg.record_call();
        assert_eq!(reg.calls, -1);
        assert!(!reg.exhausted());

        reg.record_call();
        assert!(reg.exhausted());
    }

    #[test]
    fn unbounded_counter_accumulates() {
        let mut reg = Registration::new(0, noop(), 0);
        for _ in 0..5 {
            reg.record_call();
        }
        assert_eq!(reg.calls, 5);
        assert!(!reg.exhausted());
    }

    #[test]
    fn identity_is_per_rc_not_per_shape() {
        let a: EventFn<()> = Rc::new(|_| {});
        let b: EventFn<()> = Rc::new(|_| {});
        let reg: Registration<&str, ()> = Registration::new(0, Callback::Named(Rc::clone(&a)), 0);

        assert!(reg.callback.is_named(&a));
        assert!(!reg.callback.is_named(&b));
    }
}
