use std::{thread, time::Instant};

use fair_queue::FairQueue;

const PRODUCERS: u64 = 4;
const CONSUMERS: usize = 4;
const PER_PRODUCER: u64 = 100_000;
const POISON: u64 = u64::MAX;

// Quick MPMC throughput run, handy for eyeballing contention behavior.
fn main() {
    let queue = FairQueue::new();
    let start = Instant::now();

    let consumers: Vec<_> = (0..CONSUMERS)
        .map(|_| {
            let queue = queue.clone();
            thread::spawn(move || {
                let mut count = 0u64;
                while let Some(value) = queue.pop() {
                    if value == POISON {
                        break;
                    }
                    count += 1;
                }
                count
            })
        })
        .collect();

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let queue = queue.clone();
            thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    queue.push(p * PER_PRODUCER + i).unwrap();
                }
            })
        })
        .collect();

    for producer in producers {
        producer.join().unwrap();
    }
    for _ in 0..CONSUMERS {
        queue.push(POISON).unwrap();
    }

    let mut count = 0u64;
    for consumer in consumers {
        count += consumer.join().unwrap();
    }

    let elapsed = start.elapsed();
    println!(
        "delivered {count} items across {CONSUMERS} consumers in {elapsed:?} ({:.0} items/s), visited={}",
        count as f64 / elapsed.as_secs_f64(),
        queue.visited(),
    );
}
