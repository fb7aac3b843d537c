mod local_file_processor_test;
