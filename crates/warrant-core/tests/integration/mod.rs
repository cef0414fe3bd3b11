mod concurrency;
mod config_file;
mod post_scenario;
