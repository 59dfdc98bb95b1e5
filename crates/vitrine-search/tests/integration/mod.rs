mod concurrent_build;
mod search_pipeline;
