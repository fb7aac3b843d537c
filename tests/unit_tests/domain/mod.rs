mod metadata_test;
