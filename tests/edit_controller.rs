// SPDX-License-Identifier: MPL-2.0
//! Click handling of the spot edit controller, driven through its public API.

use spot_lens::display::{
    ClickEvent, DisplaySurface, EditState, Effect, HyperStack, SpotDisplayer, SpotEditController,
    StackView, Viewport,
};
use spot_lens::domain::{Calibration, SelectionMode, Settings, Spot, SpotCollection};

/// Surface with a fixed scale and position.
struct FixedSurface {
    scale: f32,
    slice: usize,
    frame: usize,
}

impl FixedSurface {
    fn identity() -> Self {
        Self {
            scale: 1.0,
            slice: 1,
            frame: 1,
        }
    }
}

impl DisplaySurface for FixedSurface {
    fn offscreen_x(&self, screen_x: f32) -> i32 {
        (screen_x / self.scale).floor() as i32
    }

    fn offscreen_y(&self, screen_y: f32) -> i32 {
        (screen_y / self.scale).floor() as i32
    }

    fn current_slice(&self) -> usize {
        self.slice
    }

    fn current_frame(&self) -> usize {
        self.frame
    }
}

fn unit_controller(radius: f32) -> SpotEditController {
    SpotEditController::new(Calibration::default(), radius)
}

fn one_spot_at(position: [f32; 3]) -> (Spot, SpotCollection) {
    let spot = Spot::new(position);
    let mut spots = SpotCollection::new();
    spots.add(spot.clone(), 0);
    (spot, spots)
}

#[test]
fn double_click_on_spot_edits_it_and_second_double_click_leaves() {
    let (spot, spots) = one_spot_at([10.0, 10.0, 0.0]);
    let surface = FixedSurface::identity();
    let mut controller = unit_controller(5.0);

    let effects = controller.handle_click(&ClickEvent::double(10.0, 10.0), &surface, &spots);
    assert_eq!(controller.edited_spot().map(Spot::id), Some(spot.id()));
    assert_eq!(
        effects.last(),
        Some(&Effect::EditedSpotChanged(Some(spot.clone())))
    );

    let effects = controller.handle_click(&ClickEvent::double(200.0, 3.0), &surface, &spots);
    assert_eq!(controller.state(), &EditState::Idle);
    assert!(controller.edited_spot().is_none());
    assert_eq!(effects.last(), Some(&Effect::EditedSpotChanged(None)));
}

#[test]
fn double_click_on_empty_frame_creates_spot_at_click() {
    let surface = FixedSurface {
        scale: 2.0,
        slice: 3,
        frame: 1,
    };
    let calibration = Calibration {
        dx: 0.5,
        dy: 0.25,
        dz: 2.0,
    };
    let mut controller = SpotEditController::new(calibration, 1.0);

    controller.handle_click(
        &ClickEvent::double(20.0, 40.0),
        &surface,
        &SpotCollection::new(),
    );

    let spot = controller.edited_spot().expect("new spot");
    assert_eq!(spot.position(), [5.0, 5.0, 4.0]);
}

#[test]
fn double_click_far_from_nearest_spot_creates_new_spot() {
    let (spot, spots) = one_spot_at([10.0, 10.0, 0.0]);
    let mut controller = unit_controller(5.0);

    controller.handle_click(
        &ClickEvent::double(16.0, 10.0),
        &FixedSurface::identity(),
        &spots,
    );

    let edited = controller.edited_spot().expect("editing");
    assert_ne!(edited.id(), spot.id());
    assert_eq!(edited.position(), [16.0, 10.0, 0.0]);
}

#[test]
fn double_click_at_exact_radius_reuses_spot() {
    let (spot, spots) = one_spot_at([10.0, 10.0, 0.0]);
    let mut controller = unit_controller(5.0);

    controller.handle_click(
        &ClickEvent::double(13.0, 14.0),
        &FixedSurface::identity(),
        &spots,
    );

    assert_eq!(controller.edited_spot().map(Spot::id), Some(spot.id()));
}

#[test]
fn single_click_while_editing_does_nothing() {
    let (_, spots) = one_spot_at([10.0, 10.0, 0.0]);
    let surface = FixedSurface::identity();
    let mut controller = unit_controller(5.0);
    controller.handle_click(&ClickEvent::double(10.0, 10.0), &surface, &spots);
    let before = controller.state().clone();

    let effects = controller.handle_click(
        &ClickEvent::single(10.0, 10.0).with_additive(true),
        &surface,
        &spots,
    );

    assert!(effects.is_empty());
    assert_eq!(controller.state(), &before);
}

#[test]
fn single_click_mode_follows_shift() {
    let (spot, spots) = one_spot_at([10.0, 10.0, 0.0]);
    let surface = FixedSurface::identity();
    let mut controller = unit_controller(5.0);

    let replace = controller.handle_click(&ClickEvent::single(50.0, 50.0), &surface, &spots);
    let add = controller.handle_click(
        &ClickEvent::single(50.0, 50.0).with_additive(true),
        &surface,
        &spots,
    );

    assert_eq!(
        replace,
        vec![Effect::SelectionChanged {
            target: Some(spot.clone()),
            frame: 0,
            mode: SelectionMode::Replace,
        }]
    );
    assert_eq!(
        add,
        vec![Effect::SelectionChanged {
            target: Some(spot),
            frame: 0,
            mode: SelectionMode::Add,
        }]
    );
    assert_eq!(controller.state(), &EditState::Idle);
}

#[test]
fn clicks_only_consider_spots_of_current_frame() {
    let mut spots = SpotCollection::new();
    let near_other_frame = Spot::new([10.0, 10.0, 0.0]);
    let far_current_frame = Spot::new([60.0, 60.0, 0.0]);
    spots.add(near_other_frame, 0);
    spots.add(far_current_frame.clone(), 1);
    let surface = FixedSurface {
        frame: 2,
        ..FixedSurface::identity()
    };
    let mut controller = unit_controller(5.0);

    let effects = controller.handle_click(&ClickEvent::single(10.0, 10.0), &surface, &spots);
    assert_eq!(
        effects,
        vec![Effect::SelectionChanged {
            target: Some(far_current_frame),
            frame: 1,
            mode: SelectionMode::Replace,
        }]
    );
}

#[test]
fn at_most_one_spot_is_edited_over_any_sequence() {
    let mut spots = SpotCollection::new();
    for i in 0..5 {
        spots.add(Spot::new([i as f32 * 20.0, 0.0, 0.0]), 0);
    }
    let surface = FixedSurface::identity();
    let mut controller = unit_controller(3.0);
    let clicks = [
        ClickEvent::double(0.0, 0.0),
        ClickEvent::single(20.0, 0.0),
        ClickEvent::double(40.0, 1.0),
        ClickEvent::double(41.0, 0.0),
        ClickEvent::single(60.0, 0.0).with_additive(true),
        ClickEvent::double(99.0, 99.0),
        ClickEvent {
            click_count: 3,
            ..ClickEvent::single(0.0, 0.0)
        },
    ];

    let mut editing = false;
    for click in clicks {
        let effects = controller.handle_click(&click, &surface, &spots);
        let edits: Vec<_> = effects
            .iter()
            .filter(|e| matches!(e, Effect::EditedSpotChanged(_)))
            .collect();
        assert!(edits.len() <= 1);
        if click.click_count == 2 {
            assert_eq!(edits.len(), 1);
            editing = !editing;
        }
        assert_eq!(controller.is_editing(), editing);
    }
}

#[test]
fn displayer_maps_letterboxed_clicks_to_pixels() {
    let settings = Settings {
        width: 100,
        height: 50,
        ..Settings::default()
    };
    let stack = HyperStack::blank("cells", 100, 50, 1, 1).expect("stack");
    let mut displayer = SpotDisplayer::new(settings).with_stack(stack);
    displayer.render().expect("render");

    // 200x200 canvas: magnification 2, image starts 50 px down
    let viewport = Viewport::fit(100, 50, 200.0, 200.0);
    displayer.set_viewport(viewport);
    displayer.mouse_clicked(&ClickEvent::double(40.0, 70.0));

    let view: &StackView = displayer.view().expect("rendered");
    assert_eq!(view.stack().title(), "cells");
    let EditState::Editing(spot) = displayer.edit_state() else {
        panic!("expected edit mode");
    };
    assert_eq!(spot.position(), [20.0, 10.0, 0.0]);
}
