use evmlake_tests::tests;

#[tokio::main]
async fn main() {
    tests::setup().await;
}
