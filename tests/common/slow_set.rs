/// Dummy implementation of the ordered multiset, most of the operations take linear time.
#[allow(dead_code)]
#[derive(Clone, Debug, Default)]
pub struct SlowSet {
    keys: Vec<i32>,
}

#[allow(dead_code)]
impl SlowSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sorted(keys: Vec<i32>) -> Self {
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        Self { keys }
    }

    pub fn keys(&self) -> &[i32] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn contains(&self, key: i32) -> bool {
        self.keys.binary_search(&key).is_ok()
    }

    /// Number of keys strictly less than `key`.
    pub fn position(&self, key: i32) -> usize {
        self.keys.partition_point(|&k| k < key)
    }

    pub fn select(&self, pos: usize) -> Option<i32> {
        self.keys.get(pos).copied()
    }

    pub fn insert(&mut self, key: i32) -> bool {
        if self.contains(key) {
            return false;
        }
        self.insert_dup(key);
        true
    }

    pub fn insert_dup(&mut self, key: i32) {
        let at = self.keys.partition_point(|&k| k <= key);
        self.keys.insert(at, key);
    }

    pub fn remove(&mut self, key: i32) -> bool {
        match self.keys.binary_search(&key) {
            Ok(i) => {
                self.keys.remove(i);
                true
            }
            Err(_) => false,
        }
    }

    pub fn remove_pos(&mut self, pos: usize) -> i32 {
        self.keys.remove(pos)
    }

    pub fn split_pos(&mut self, pos: usize) -> (Self, Self) {
        let right = self.keys.split_off(pos);
        (Self::from_sorted(std::mem::take(&mut self.keys)), Self::from_sorted(right))
    }

    pub fn split_key_dup(&mut self, key: i32) -> (Self, Self) {
        let pos = self.position(key);
        self.split_pos(pos)
    }

    pub fn join_dup(&mut self, other: &mut Self) {
        for key in std::mem::take(&mut other.keys) {
            self.insert_dup(key);
        }
    }

    /// Keys of `other` replace all equal keys of `self`, which move to `dup`.
    pub fn join(&mut self, other: &mut Self, dup: &mut Self) {
        for key in std::mem::take(&mut other.keys) {
            while self.remove(key) {
                dup.insert_dup(key);
            }
            self.insert_dup(key);
        }
    }
}
