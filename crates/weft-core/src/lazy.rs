//! Lazy - 一度だけ計算してキャッシュするセル
//!
//! 二種類を使い分ける:
//! - **LockedOnce**: 計算中は他の呼び出し元をブロックし、計算は必ず一回。
//!   副作用のある計算（converter への context 付与など）向け。失敗も結果としてキャッシュする。
//! - **RacyOnce**: ロックなしで複数スレッドが同時に計算してよい。最初に publish された値だけが残る。
//!   純粋で冪等な計算向け。

use std::fmt;
use std::sync::OnceLock;

/// Compute-once-under-lock cell.
///
/// Concurrent callers block until the single computation finishes and then
/// all observe the same `Ok` or `Err`.
pub struct LockedOnce<T, E> {
    cell: OnceLock<Result<T, E>>,
}

impl<T, E: Clone> LockedOnce<T, E> {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    pub fn get_or_init<F>(&self, init: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.cell.get_or_init(init).as_ref().map_err(E::clone)
    }

    /// 計算済みなら結果を返す（計算はしない）
    pub fn get(&self) -> Option<Result<&T, E>> {
        self.cell
            .get()
            .map(|result| result.as_ref().map_err(E::clone))
    }
}

impl<T, E: Clone> Default for LockedOnce<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for LockedOnce<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LockedOnce").field(&self.cell.get()).finish()
    }
}

/// Compute-maybe-redundantly-then-publish-once cell.
///
/// `init` runs outside any lock, so it may run on several threads at once.
/// Whichever value is published first is kept; the others are dropped.
pub struct RacyOnce<T> {
    cell: OnceLock<T>,
}

impl<T> RacyOnce<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    pub fn get_or_publish<F>(&self, init: F) -> &T
    where
        F: FnOnce() -> T,
    {
        if let Some(value) = self.cell.get() {
            return value;
        }
        let value = init();
        // publish だけを OnceLock の初期化に入れる（計算そのものはロックの外）
        self.cell.get_or_init(move || value)
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }
}

impl<T> Default for RacyOnce<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for RacyOnce<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RacyOnce").field(&self.cell.get()).finish()
    }
}
