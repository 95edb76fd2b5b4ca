use cookietrail_game::{
    Cart, ControllerError, Ending, GameConfig, GameController, GamePhase, MinigameOutcome,
    MinigameSession, type_answer,
};

/// Play a started session to its end, answering correctly whenever `gate`
/// allows and letting the clock run otherwise.
fn play_session(mut session: MinigameSession, mut gate: impl FnMut() -> bool) -> MinigameOutcome {
    session.start();
    while !session.is_finished() {
        session.tick_second();
        if session.is_finished() {
            break;
        }
        if gate() {
            let answer = session.problem().answer();
            type_answer(&mut session, answer);
            if !session.is_finished() {
                session.next_problem();
            }
        }
    }
    session.into_outcome().expect("finished session")
}

/// Run one full day: orders, shopping, both minigames, summary.
fn play_day(game: &mut GameController) -> GamePhase {
    assert_eq!(game.phase(), GamePhase::Order);
    game.accept_orders().unwrap();

    let demand = game.state().current_day_demand;
    let recipe = game.state().recipe;
    let mut batches = demand;
    let mut cart = Cart::for_recipes(&recipe, batches);
    while batches > 0
        && cookietrail_game::calculate_cart_total(&cart, game.prices()) > game.state().funds_cents
    {
        batches -= 1;
        cart = Cart::for_recipes(&recipe, batches);
    }
    let next = game.complete_purchase(&cart).unwrap();

    if next == GamePhase::Baking {
        let session = game.begin_baking().unwrap();
        let outcome = play_session(session, || game.try_consume_one_cookie_worth());
        game.resolve_baking(outcome).unwrap();
    }

    assert_eq!(game.phase(), GamePhase::Cleaning);
    let session = game.begin_cleaning().unwrap();
    let outcome = play_session(session, || true);
    game.resolve_cleaning(outcome).unwrap();

    assert_eq!(game.phase(), GamePhase::DaySummary);
    game.advance_day().unwrap()
}

#[test]
fn profitable_run_reaches_victory() {
    // Cheap ingredients so a competent baker turns a profit every day.
    let cfg = GameConfig::from_key_values(
        "# integration tuning\nFLOUR_PRICE_MIN=0.1\nFLOUR_PRICE_MAX=0.1\nWIN_THRESHOLD=600\n",
    );
    let mut game = GameController::new(cfg, 0xC00C1E);
    game.submit_login("Tester").unwrap();
    game.acknowledge_instructions().unwrap();

    let mut phase = GamePhase::Order;
    for _ in 0..30 {
        phase = play_day(&mut game);
        if phase == GamePhase::GameOver {
            break;
        }
    }

    assert_eq!(phase, GamePhase::GameOver);
    assert_eq!(game.ending(), Some(Ending::Victory));
    let summary = game.run_summary().unwrap();
    assert_eq!(summary.username, "Tester");
    assert!(summary.final_funds_cents >= 60_000);
    assert!(summary.days_played >= 1);
    assert!(summary.total_cookies_sold > 0);

    // Each completed day left a ledger entry with coherent accounting.
    for day in &game.state().ledger {
        assert!(day.dishes_cleaned <= day.cookies_baked);
        assert_eq!(
            day.net_cents(),
            day.revenue_cents + day.tips_cents - day.expenses_cents - day.dish_penalty_cents
        );
    }
}

#[test]
fn unprofitable_run_goes_bankrupt() {
    // One affordable recipe, a near-worthless cookie, and a skipped cleanup.
    let cfg = GameConfig::from_key_values(
        "STARTING_FUNDS=7\nFLOUR_PRICE_MIN=1\nFLOUR_PRICE_MAX=1\nCOOKIE_PRICE=1\n",
    );
    let mut game = GameController::new(cfg, 7);
    game.submit_login("Tester").unwrap();
    game.acknowledge_instructions().unwrap();
    game.accept_orders().unwrap();

    let recipe = game.state().recipe;
    let cart = Cart::for_recipes(&recipe, 1); // exactly $7
    let next = game.complete_purchase(&cart).unwrap();
    assert_eq!(next, GamePhase::Baking);
    assert_eq!(game.state().funds_cents, 0);

    // Bake the single cookie the pantry supports.
    let session = game.begin_baking().unwrap();
    let outcome = play_session(session, || game.try_consume_one_cookie_worth());
    assert!(outcome.result.correct_answers >= 1);
    game.resolve_baking(outcome).unwrap();
    assert_eq!(game.state().dishes_to_clean, 1);

    // Skip the cleanup: the dish penalty lands the account deep in debt.
    let mut session = game.begin_cleaning().unwrap();
    session.skip();
    let outcome = session.into_outcome().unwrap();
    assert!(outcome.skipped);
    game.resolve_cleaning(outcome).unwrap();
    assert!(game.state().funds_cents < 0);

    assert_eq!(game.advance_day().unwrap(), GamePhase::GameOver);
    assert_eq!(game.ending(), Some(Ending::Bankrupt));
}

#[test]
fn recipe_book_detour_and_misuse_rejection() {
    let mut game = GameController::new(GameConfig::default(), 5);
    game.submit_login("Tester").unwrap();
    game.acknowledge_instructions().unwrap();
    game.accept_orders().unwrap();
    assert_eq!(game.phase(), GamePhase::Shopping);

    // Interstitial detour returns to the invoking phase.
    game.open_recipe_book().unwrap();
    assert_eq!(game.phase(), GamePhase::RecipeBook);
    assert!(matches!(
        game.accept_orders(),
        Err(ControllerError::WrongPhase { .. })
    ));
    assert_eq!(game.close_recipe_book().unwrap(), GamePhase::Shopping);

    // Empty purchase cannot bake; day degrades to cleaning with a warning.
    let next = game.complete_purchase(&Cart::new()).unwrap();
    assert_eq!(next, GamePhase::Cleaning);
    assert!(
        game.state()
            .logs
            .iter()
            .any(|key| key == "log.shop.cannot-bake")
    );
}

#[test]
fn same_seed_reproduces_the_same_run() {
    let run = |seed: u64| {
        let mut game = GameController::new(GameConfig::default(), seed);
        game.submit_login("Tester").unwrap();
        game.acknowledge_instructions().unwrap();
        for _ in 0..3 {
            if play_day(&mut game) == GamePhase::GameOver {
                break;
            }
        }
        (game.state().funds_cents, game.state().ledger.clone())
    };
    assert_eq!(run(1234), run(1234));
    assert_ne!(run(1234).1, run(4321).1);
}
