use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use craft::{Backends, EngineConfig, GameState, HeadlessRenderer};
use craft_blocks::BlockRegistry;
use craft_blocks::types::{GRASS, STONE};
use craft_geom::Pose;
use craft_io::{Client, ClientRequest, MemoryStore, OfflineClient, RecordingClient};
use craft_mesh_cpu::BakeOptions;
use craft_world::{ChunkCoord, FlatWorld};

const STONE_W: i32 = STONE as i32;

fn flat_state(client: Arc<dyn Client>, store: Arc<MemoryStore>) -> GameState {
    let cfg = EngineConfig {
        workers: 2,
        create_radius: 2,
        render_radius: 2,
        delete_radius: 4,
        ..EngineConfig::default()
    };
    let backends = Backends {
        registry: Arc::new(BlockRegistry::builtin()),
        generator: Arc::new(FlatWorld {
            thickness: 12,
            block: GRASS,
        }),
        store,
        client,
        bake: BakeOptions::default(),
    };
    GameState::new(cfg.sanitized(), backends, HeadlessRenderer::new()).unwrap()
}

fn spawned() -> GameState {
    let mut state = flat_state(Arc::new(OfflineClient), Arc::new(MemoryStore::new()));
    state.spawn();
    state
}

fn looking_down(x: f32, y: f32, z: f32) -> Pose {
    Pose::new(x, y, z, 0.0, -FRAC_PI_2)
}

#[test]
fn spawn_builds_the_ring_and_stands_on_the_ground() {
    let state = spawned();
    assert_eq!(state.chunks.len(), 9);
    let center = state.chunks.get(ChunkCoord::new(0, 0)).unwrap();
    assert_eq!(center.faces, 32 * 32);
    assert!(!center.dirty);
    assert_eq!(state.me().pose.y, 13.0);
    // one block and one sign buffer per chunk
    assert_eq!(state.renderer.live(), 18);
}

#[test]
fn workers_fill_the_create_radius() {
    let mut state = spawned();
    let pose = state.me().pose;
    let deadline = Instant::now() + Duration::from_secs(30);
    loop {
        state.ensure_chunks(&pose);
        let done = state.chunks.len() == 25 && state.chunks.iter().all(|c| !c.dirty && !c.buffer.is_none());
        if done {
            break;
        }
        assert!(Instant::now() < deadline, "workers never caught up");
        thread::sleep(Duration::from_millis(5));
    }
    let corner = state.chunks.get(ChunkCoord::new(2, -2)).unwrap();
    assert_eq!(corner.faces, 32 * 32);
    assert_eq!(corner.blocks.get(64, 11, -64), GRASS as i32);
}

#[test]
fn edge_edits_shadow_into_the_neighbour() {
    let store = Arc::new(MemoryStore::new());
    let mut state = flat_state(Arc::new(OfflineClient), store.clone());
    state.spawn();
    state.set_block(31, 12, 5, STONE_W);

    let own = state.chunks.get(ChunkCoord::new(0, 0)).unwrap();
    let east = state.chunks.get(ChunkCoord::new(1, 0)).unwrap();
    assert_eq!(own.blocks.get(31, 12, 5), STONE_W);
    assert_eq!(east.blocks.get(31, 12, 5), -STONE_W);
    assert!(own.dirty && east.dirty);
    // the chunk across z is not touched
    assert!(!state.chunks.get(ChunkCoord::new(0, -1)).unwrap().dirty);
    assert_eq!(store.block(0, 0, 31, 12, 5), Some(STONE_W));
    assert_eq!(store.block(1, 0, 31, 12, 5), Some(-STONE_W));
    // reads go to the owning chunk, never to a shadow
    assert_eq!(state.get_block(31, 12, 5), STONE_W);
}

#[test]
fn clearing_a_block_drops_its_light_and_signs() {
    let mut state = spawned();
    state.set_block(5, 12, 5, STONE_W);
    state.set_sign(5, 12, 5, 0, "hello");
    state.toggle_light(5, 12, 5);
    let chunk = state.chunks.get(ChunkCoord::new(0, 0)).unwrap();
    assert_eq!(chunk.lights.get(5, 12, 5), 15);
    assert_eq!(chunk.signs.len(), 1);

    state.set_block(5, 12, 5, 0);
    let chunk = state.chunks.get(ChunkCoord::new(0, 0)).unwrap();
    assert_eq!(state.get_block(5, 12, 5), 0);
    assert_eq!(chunk.lights.get(5, 12, 5), 0);
    assert!(chunk.signs.is_empty());
}

#[test]
fn builder_respects_the_build_height() {
    let mut state = spawned();
    state.builder_block(5, 0, 5, 0);
    assert_eq!(state.get_block(5, 0, 5), GRASS as i32);
    state.builder_block(5, 256, 5, STONE_W);
    assert_eq!(state.get_block(5, 256, 5), 0);
    state.builder_block(5, 11, 5, STONE_W);
    assert_eq!(state.get_block(5, 11, 5), STONE_W);
}

#[test]
fn clicks_place_and_break_the_targeted_block() {
    let mut state = spawned();
    state.me_mut().pose = looking_down(5.0, 14.0, 5.0);
    let pose = state.me().pose;

    let hit = state.hit_test(false, &pose).unwrap();
    assert_eq!((hit.x, hit.y, hit.z, hit.w), (5, 11, 5, GRASS as i32));
    let before = state.hit_test(true, &pose).unwrap();
    assert_eq!((before.x, before.y, before.z), (5, 12, 5));
    let (_, face) = state.hit_test_face(&pose).unwrap();
    assert!((4..8).contains(&face));

    let item = i32::from(state.registry.items[0]);
    state.on_right_click();
    assert_eq!(state.get_block(5, 12, 5), item);
    assert_eq!(state.selection.block0.w, item);

    state.on_left_click();
    assert_eq!(state.get_block(5, 12, 5), 0);
}

#[test]
fn commands_edit_the_world_and_talk_falls_through() {
    let mut state = spawned();
    assert_eq!(state.run_command("/view 6"), None);
    assert_eq!(
        (state.cfg.create_radius, state.cfg.render_radius, state.cfg.delete_radius),
        (6, 6, 10)
    );
    assert_eq!(state.run_command("/view 99"), None);
    assert_eq!(state.cfg.create_radius, 6);
    assert_eq!(state.run_command("hello"), Some("hello".to_string()));

    state.record_block(2, 12, 2, STONE_W);
    state.record_block(4, 14, 4, STONE_W);
    assert_eq!(state.run_command("/fcube"), None);
    for (x, y, z) in [(2, 12, 2), (3, 13, 3), (4, 14, 4)] {
        assert_eq!(state.get_block(x, y, z), STONE_W);
    }
}

#[test]
fn far_chunks_are_evicted_and_their_buffers_released() {
    let mut state = spawned();
    assert_eq!(state.renderer.live(), 18);
    state.me_mut().pose.x = 32.0 * 10.0;
    state.delete_chunks();
    assert!(state.chunks.is_empty());
    assert_eq!(state.renderer.live(), 0);
    assert_eq!(state.renderer.deletes, 18);
}

#[test]
fn edits_and_chunk_requests_reach_the_server() {
    let client = Arc::new(RecordingClient::new());
    let mut state = flat_state(client.clone(), Arc::new(MemoryStore::new()));
    state.spawn();
    let sent = client.take();
    assert_eq!(sent.len(), 9);
    assert!(sent.contains(&ClientRequest::Chunk { p: 0, q: 0, key: 0 }));

    state.set_block(5, 12, 5, STONE_W);
    state.toggle_light(5, 12, 5);
    assert_eq!(
        client.take(),
        vec![
            ClientRequest::Block { x: 5, y: 12, z: 5, w: STONE_W },
            ClientRequest::Light { x: 5, y: 12, z: 5, w: 15 },
        ]
    );

    // server echoes are applied without being sent back
    state.apply_remote_block(0, 0, 6, 12, 6, STONE_W);
    assert_eq!(state.get_block(6, 12, 6), STONE_W);
    assert!(client.take().is_empty());
}

#[test]
fn remote_players_come_and_go() {
    let mut state = spawned();
    assert!(state.add_or_update_player(7, Pose::new(1.0, 13.0, 1.0, 0.0, 0.0), 0.0));
    assert!(state.add_or_update_player(7, Pose::new(3.0, 13.0, 1.0, 0.0, 0.0), 1.0));
    assert_eq!(state.players.len(), 2);
    state.interpolate_players(1.5);
    assert!(!state.players[1].buffer.is_none());

    state.remove_player(0);
    assert_eq!(state.players.len(), 2);
    state.remove_player(7);
    assert_eq!(state.players.len(), 1);
}

#[test]
fn frames_stream_chunks_and_shutdown_flushes() {
    let store = Arc::new(MemoryStore::new());
    let mut state = flat_state(Arc::new(OfflineClient), store.clone());
    state.spawn();
    let stats = state.frame(0.0);
    assert!(stats.chunks >= 9);
    assert!(stats.visible >= 1);
    assert!(stats.faces >= 32 * 32);

    state.set_block(5, 12, 5, STONE_W);
    state.shutdown();
    assert!(state.chunks.is_empty());
    assert_eq!(state.renderer.live(), 0);
    assert!(store.commits() >= 1);
    assert_eq!(store.pending(), 0);
    assert_eq!(store.block(0, 0, 5, 12, 5), Some(STONE_W));
}

#[test]
fn signs_are_counted_only_within_the_sign_radius() {
    let mut state = spawned();
    state.cfg.sign_radius = 0;
    state.set_sign(5, 12, 5, 0, "hi there");
    state.gen_chunk_buffer(ChunkCoord::new(0, 0));

    let near = state.visible_chunks(&looking_down(5.0, 14.0, 5.0));
    assert_eq!(near.signs, 7);
    // one chunk over, the sign's chunk is still drawn but its sign is not
    let far = state.visible_chunks(&looking_down(33.0, 14.0, 5.0));
    assert!(far.visible >= 2);
    assert_eq!(far.signs, 0);
}

#[test]
fn frame_reports_the_player_under_the_crosshair() {
    let mut state = spawned();
    assert_eq!(state.frame(0.0).target, None);
    let me = state.me().pose;
    let ahead = me.position() + me.sight_vector() * 10.0;
    assert!(state.add_or_update_player(9, Pose::new(ahead.x, ahead.y, ahead.z, 0.0, 0.0), 0.0));
    assert_eq!(state.frame(0.0).target, Some(9));
}
