mod common;

use common::winning_moves;
use tictactoe_mdp::{
    Agent, PlanningConfig, PolicyIterationAgent, QLearningAgent, QLearningConfig, Rewards,
    ValueIterationAgent,
    mdp::{Environment, GameModel, Policy, TransitionModel, total_probability},
    tictactoe::{BoardState, Player, TicTacToe, TttEnvironment, TttMdp},
};

fn assert_takes_every_immediate_win(policy: &Policy<BoardState, usize>, game: &TicTacToe) {
    for state in game.enumerate_states() {
        if state.is_terminal() {
            continue;
        }
        let wins = winning_moves(&state);
        if wins.is_empty() {
            continue;
        }
        let chosen = policy.select(&state).unwrap();
        assert!(
            wins.contains(&chosen),
            "{} plays {chosen} instead of one of {wins:?}",
            state.encode()
        );
    }
}

#[test]
fn transition_probabilities_sum_to_one_for_both_sides() {
    for agent in [Player::X, Player::O] {
        let mdp = TttMdp::new(agent, Rewards::default());
        for state in mdp.enumerate_states() {
            for action in mdp.legal_actions(&state) {
                let transitions = mdp.transitions(&state, action).unwrap();
                let total = total_probability(&transitions);
                assert!(
                    (total - 1.0).abs() < 1e-9,
                    "{} / {action}: {total}",
                    state.encode()
                );
            }
        }
    }
}

#[test]
fn policy_iteration_plays_legal_winning_moves() {
    let agent =
        PolicyIterationAgent::new(TttMdp::default(), PlanningConfig::default().with_seed(11))
            .unwrap();
    assert!(agent.policy().is_total_for(agent.game()));
    assert_takes_every_immediate_win(agent.policy(), agent.game().game());

    for (state, value) in agent.values().iter() {
        if state.is_terminal() {
            assert_eq!(value, 0.0);
            assert!(agent.policy().get(state).is_none());
        }
    }
}

#[test]
fn value_iteration_plays_legal_winning_moves() {
    let agent = ValueIterationAgent::new(TttMdp::default(), PlanningConfig::default()).unwrap();
    assert!(agent.policy().is_total_for(agent.game()));
    assert_takes_every_immediate_win(agent.policy(), agent.game().game());
    assert!(agent.values().iter().all(|(s, v)| !s.is_terminal() || v == 0.0));
}

#[test]
fn planners_agree_on_the_value_of_a_won_position() {
    let config = PlanningConfig::default().with_seed(12);
    let pi = PolicyIterationAgent::new(TttMdp::default(), config.clone()).unwrap();
    let vi = ValueIterationAgent::new(TttMdp::default(), config).unwrap();
    // XX.
    // OO.
    // ...
    let state = BoardState::from_string("XX. OO. ...").unwrap();
    assert_eq!(pi.values().get(&state).unwrap(), 10.0);
    assert_eq!(vi.values().get(&state).unwrap(), 10.0);
}

#[test]
fn agent_can_plan_as_second_player() {
    let mdp = TttMdp::new(Player::O, Rewards::default());
    let agent = ValueIterationAgent::new(mdp, PlanningConfig::default()).unwrap();
    assert!(agent.policy().is_total_for(agent.game()));

    let opening = BoardState::new().make_move(4).unwrap();
    let reply = agent.select_move(&opening).unwrap();
    assert!(opening.legal_moves().contains(&reply));
    assert!(agent.select_move(&BoardState::new()).is_err());
}

#[test]
fn value_iteration_extraction_is_deterministic() {
    let config = PlanningConfig::default().with_sweeps(6);
    let a = ValueIterationAgent::new(TttMdp::default(), config.clone()).unwrap();
    let b = ValueIterationAgent::new(TttMdp::default(), config).unwrap();
    assert_eq!(a.policy(), b.policy());
    assert_eq!(a.extract_policy().unwrap(), a.extract_policy().unwrap());
}

#[test]
fn q_learning_against_random_opponent_yields_a_total_legal_policy() {
    let env = TttEnvironment::against_random(Rewards::default(), Some(21));
    let config = QLearningConfig::default().with_episodes(2_000).with_seed(21);
    let agent = QLearningAgent::new(env, config).unwrap();

    assert_eq!(agent.episodes_done(), 2_000);
    assert!(agent.epsilon() < 0.1);
    assert!(agent.policy().is_total_for(agent.environment().game()));
    assert_eq!(agent.extract_policy().unwrap(), agent.extract_policy().unwrap());
}
