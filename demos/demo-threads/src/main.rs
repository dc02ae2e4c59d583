use std::{thread, time::Duration};

use fair_queue::FairQueue;

// Two consumers park first; the next two pushes are handed to them in
// arrival order. Pushes made while every worker is busy become surplus
// that a non-blocking probe can harvest.
fn main() {
    let queue = FairQueue::new();

    let workers: Vec<_> = (0..2)
        .map(|id| {
            let queue = queue.clone();
            thread::spawn(move || {
                while let Some(job) = queue.pop() {
                    println!("worker {id} got job {job}");
                    // Simulated work keeps the worker away from the queue.
                    thread::sleep(Duration::from_millis(100));
                }
                println!("worker {id} shutting down");
            })
        })
        .collect();

    // Let both workers park before feeding them.
    while queue.waiters() < 2 {
        thread::sleep(Duration::from_millis(1));
    }

    queue.push("resize").unwrap();
    queue.push("encode").unwrap();

    // Both workers are busy now, so these two pile up in the buffer.
    queue.push("upload").unwrap();
    queue.push("cleanup").unwrap();
    if let Some(job) = queue.try_pop() {
        println!("main harvested surplus job {job}");
    }

    thread::sleep(Duration::from_millis(300));
    println!("{} jobs delivered so far", queue.visited());

    queue.close();
    for worker in workers {
        worker.join().unwrap();
    }
}
