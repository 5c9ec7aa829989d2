mod sale_lifecycle;
mod shared_rng;
