mod edit_tests;
