//! Tests for the token service

mod codec_tests;
