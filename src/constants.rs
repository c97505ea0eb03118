pub const DEFAULT_UP_RATE: usize = 1;
pub const DEFAULT_THREADS: usize = 1;
pub const DEFAULT_BAUD_PERIOD_SEC: f64 = 0.01;
pub const DEFAULT_NUM_TIMES: usize = 100;
pub const MAX_THREADS: usize = 1024;
