// Copyright 2024 ihciah. All Rights Reserved.

mod queue;
mod waiter;

pub use queue::FairQueue;
