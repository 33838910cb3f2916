//! Single-use subscriptions.
//!
//! A [`OneShot`] holds at most one armed subscription: a set of event keys and
//! a payload. The first matching event consumes it, so a subscription can
//! never fire twice.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<K, T> {
    /// Every key the subscription was listening on; callers detach all of them.
    pub keys: Vec<K>,
    pub payload: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Armed<K, T> {
    keys: Vec<K>,
    payload: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneShot<K, T> {
    armed: Option<Armed<K, T>>,
}

impl<K, T> Default for OneShot<K, T> {
    fn default() -> Self {
        Self { armed: None }
    }
}

impl<K: PartialEq, T> OneShot<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a new subscription, replacing any previous one.
    ///
    /// Returns the keys of the replaced subscription (empty if none).
    pub fn arm(&mut self, mut keys: Vec<K>, payload: T) -> Vec<K> {
        dedup_keys(&mut keys);
        let previous = self.disarm();
        self.armed = Some(Armed { keys, payload });
        previous
    }

    /// Drops the current subscription, returning its keys.
    pub fn disarm(&mut self) -> Vec<K> {
        self.armed.take().map(|a| a.keys).unwrap_or_default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn keys(&self) -> &[K] {
        self.armed.as_ref().map(|a| a.keys.as_slice()).unwrap_or(&[])
    }

    pub fn payload(&self) -> Option<&T> {
        self.armed.as_ref().map(|a| &a.payload)
    }

    /// Consumes the subscription if `key` is one of its keys.
    pub fn fire(&mut self, key: &K) -> Option<Fired<K, T>> {
        if !self.keys().contains(key) {
            return None;
        }
        self.armed.take().map(|a| Fired {
            keys: a.keys,
            payload: a.payload,
        })
    }
}

fn dedup_keys<K: PartialEq>(keys: &mut Vec<K>) {
    let mut i = 0;
    while i < keys.len() {
        if keys[..i].contains(&keys[i]) {
            keys.remove(i);
        } else {
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once() {
        let mut shot = OneShot::new();
        shot.arm(vec!["up", "end"], 7);
        let fired = shot.fire(&"end").unwrap();
        assert_eq!(fired.keys, vec!["up", "end"]);
        assert_eq!(fired.payload, 7);
        assert!(!shot.is_armed());
        assert!(shot.fire(&"up").is_none());
        assert!(shot.fire(&"end").is_none());
    }

    #[test]
    fn ignores_foreign_keys() {
        let mut shot = OneShot::new();
        shot.arm(vec!["up"], ());
        assert!(shot.fire(&"down").is_none());
        assert!(shot.is_armed());
    }

    #[test]
    fn rearm_returns_previous_keys() {
        let mut shot = OneShot::new();
        assert!(shot.arm(vec!["up", "end"], 1).is_empty());
        let old = shot.arm(vec!["down"], 2);
        assert_eq!(old, vec!["up", "end"]);
        assert_eq!(shot.keys(), &["down"]);
        assert_eq!(shot.payload(), Some(&2));
    }

    #[test]
    fn duplicate_keys_are_collapsed() {
        let mut shot = OneShot::new();
        shot.arm(vec!["up", "up", "end", "up"], ());
        assert_eq!(shot.keys(), &["up", "end"]);
    }

    #[test]
    fn empty_subscription_never_fires() {
        let mut shot: OneShot<&str, ()> = OneShot::new();
        shot.arm(Vec::new(), ());
        assert!(shot.is_armed());
        assert!(shot.fire(&"up").is_none());
        assert!(shot.disarm().is_empty());
        assert!(!shot.is_armed());
    }
}
