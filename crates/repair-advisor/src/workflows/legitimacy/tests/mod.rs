mod batch;
mod common;
mod routing;
mod scoring;
