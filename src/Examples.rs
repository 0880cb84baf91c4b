pub mod parabolic_examples;
