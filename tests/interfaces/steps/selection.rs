//! Selection rule step definitions.

use cucumber::{given, then, when, World};
use interception::advice::TimerIntercept;
use interception::descriptor::{TypeBuilder, TypeDescriptor};
use interception::selection::{MarkedOverridable, SelectionRule};

/// Test context for selection scenarios.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct SelectionWorld {
    builder: Option<TypeBuilder>,
    selected: Option<bool>,
}

impl SelectionWorld {
    fn new() -> Self {
        Self {
            builder: None,
            selected: None,
        }
    }

    fn declare(&mut self, f: impl FnOnce(TypeBuilder) -> TypeBuilder) {
        let builder = self.builder.take().expect("Type not declared");
        self.builder = Some(f(builder));
    }

    fn descriptor(&self) -> TypeDescriptor {
        self.builder.clone().expect("Type not declared").build()
    }
}

// --- Given steps ---

#[given(expr = "a type {string}")]
async fn given_type(world: &mut SelectionWorld, name: String) {
    world.builder = Some(TypeDescriptor::builder(name));
}

#[given(expr = "a plain method {string}")]
async fn given_plain_method(world: &mut SelectionWorld, method: String) {
    world.declare(|b| b.method(method));
}

#[given(expr = "an overridable method {string}")]
async fn given_overridable_method(world: &mut SelectionWorld, method: String) {
    world.declare(|b| b.overridable(method));
}

#[given(expr = "a plain method {string} marked for timing")]
async fn given_marked_plain_method(world: &mut SelectionWorld, method: String) {
    world.declare(|b| b.method(method.clone()).mark::<TimerIntercept>(method));
}

#[given(expr = "an overridable method {string} marked for timing")]
async fn given_marked_overridable_method(world: &mut SelectionWorld, method: String) {
    world.declare(|b| b.overridable(method.clone()).mark::<TimerIntercept>(method));
}

// --- When steps ---

#[when("the timing rule is evaluated")]
async fn when_rule_evaluated(world: &mut SelectionWorld) {
    let rule = MarkedOverridable::<TimerIntercept>::new();
    world.selected = Some(rule.matches(&world.descriptor()));
}

// --- Then steps ---

#[then("the type is selected")]
async fn then_selected(world: &mut SelectionWorld) {
    assert_eq!(world.selected, Some(true), "Expected type to be selected");
}

#[then("the type is not selected")]
async fn then_not_selected(world: &mut SelectionWorld) {
    assert_eq!(world.selected, Some(false), "Expected type not to be selected");
}
