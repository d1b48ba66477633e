// src/scrape/pool.rs
use std::{
    sync::{atomic::{AtomicUsize, Ordering}, mpsc},
    thread,
    time::Duration,
};

use crate::config::consts::JITTER_MS;

#[derive(Clone, Copy, Debug)]
pub struct PoolConfig {
    pub workers: usize,
    /// 0 disables the pause (and the jitter) entirely.
    pub pause_ms: u64,
}

/// Run `work` over `items` on up to `cfg.workers` threads.
/// Results come back in input order; `on_result` sees each one as it arrives
/// (arrival order), on the calling thread.
pub fn run_pool<T, R, F>(
    items: &[T],
    cfg: PoolConfig,
    work: F,
    mut on_result: impl FnMut(&T, &R),
) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    if items.is_empty() {
        return Vec::new();
    }

    let counter = AtomicUsize::new(0);
    let workers = cfg.workers.min(items.len()).max(1);
    let mut slots: Vec<Option<R>> = items.iter().map(|_| None).collect();

    thread::scope(|scope| {
        let (res_tx, res_rx) = mpsc::channel::<(usize, R)>();

        for _ in 0..workers {
            let tx = res_tx.clone();
            let (counter, work) = (&counter, &work);
            scope.spawn(move || loop {
                let i = counter.fetch_add(1, Ordering::Relaxed);
                if i >= items.len() {
                    break;
                }
                let result = work(&items[i]);
                if tx.send((i, result)).is_err() {
                    break;
                }
                if cfg.pause_ms > 0 {
                    let jitter = (i as u64) % JITTER_MS;
                    thread::sleep(Duration::from_millis(cfg.pause_ms + jitter)); // be polite
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        for (i, result) in res_rx {
            on_result(&items[i], &result);
            slots[i] = Some(result);
        }
    });

    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_keep_input_order() {
        let items: Vec<u32> = (0..25).collect();
        let mut seen = 0;
        let out = run_pool(
            &items,
            PoolConfig { workers: 4, pause_ms: 0 },
            |n| n * 2,
            |_, _| seen += 1,
        );
        assert_eq!(seen, 25);
        assert_eq!(out, items.iter().map(|n| n * 2).collect::<Vec<_>>());
    }

    #[test]
    fn empty_input_spawns_nothing() {
        let out: Vec<u8> = run_pool(&[] as &[u8], PoolConfig { workers: 8, pause_ms: 0 }, |b| *b, |_, _| {});
        assert!(out.is_empty());
    }
}
