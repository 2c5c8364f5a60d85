mod region_code;
mod test_metadata;
