mod fetcher_tests;
