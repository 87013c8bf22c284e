pub mod common;

mod production_fetch;
