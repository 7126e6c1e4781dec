//! Interface tests for the interception host using Cucumber.
//!
//! These scenarios describe which types the timing rule selects and what a
//! dispatched call prints, independent of how the kernel is implemented.
//!
//! ```bash
//! cargo test --test interfaces
//! ```

mod steps;

use cucumber::World;
use steps::dispatch::DispatchWorld;
use steps::selection::SelectionWorld;

#[tokio::main]
async fn main() {
    println!("\n=== Running Selection Interface Tests ===\n");
    SelectionWorld::cucumber()
        .fail_on_skipped()
        .run_and_exit("tests/interfaces/features/selection.feature")
        .await;

    println!("\n=== Running Dispatch Interface Tests ===\n");
    DispatchWorld::cucumber()
        .fail_on_skipped()
        .run_and_exit("tests/interfaces/features/dispatch.feature")
        .await;
}
