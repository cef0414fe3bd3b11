//! Property-based tests for hierarchy expansion and vote aggregation.
