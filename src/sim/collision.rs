//! Collision queries
//!
//! Everything collides as tight rectangles. Queries are read-only; the tick
//! applies damage and effects between queries, so an enemy killed by one
//! bullet is already skipped by the next.

use super::bullet::Bullet;
use super::enemy::Enemy;
use super::entity::Simulated;
use super::geometry::Rect;
use super::player::Player;
use super::pool::{Handle, ObjectPool};

/// What a bullet struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Enemy(Handle),
    Player,
}

/// First live candidate, in list order, whose tight bounds overlap `bounds`.
///
/// First match wins, not nearest match.
pub fn first_overlap<T: Simulated>(bounds: &Rect, candidates: &[Handle], pool: &ObjectPool<T>) -> Option<Handle> {
    candidates.iter().copied().find(|&handle| {
        pool.get(handle)
            .is_some_and(|target| target.is_alive() && target.bounds().intersects(bounds))
    })
}

pub fn overlaps_player(bullet: &Bullet, player: &Player) -> bool {
    player.is_alive() && bullet.bounds().intersects(&player.bounds())
}

/// Resolve the single target of `bullet`, if any.
///
/// Player bullets test every live enemy; enemy bullets test only the player.
pub fn bullet_target(
    bullet: &Bullet,
    enemies: &[Handle],
    enemy_pool: &ObjectPool<Enemy>,
    player: Option<&Player>,
) -> Option<HitTarget> {
    if !bullet.is_alive() {
        return None;
    }
    if bullet.is_player_bullet() {
        first_overlap(&bullet.bounds(), enemies, enemy_pool).map(HitTarget::Enemy)
    } else {
        player.filter(|p| overlaps_player(bullet, p)).map(|_| HitTarget::Player)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::consts::*;
    use crate::sim::bullet::BulletOwner;
    use crate::sim::enemy::EnemyKind;
    use crate::tuning::{BulletTuning, PlayerTuning};

    fn arena() -> Rect {
        Rect::new(Vec2::ZERO, Vec2::new(ARENA_WIDTH, ARENA_HEIGHT))
    }

    fn bullet_at(owner: BulletOwner, pos: Vec2) -> Bullet {
        let tuning = BulletTuning::default();
        let ballistics = if owner == BulletOwner::Player { tuning.player } else { tuning.enemy };
        let mut b = Bullet::default();
        b.initialize(pos, Vec2::X, owner, &ballistics, arena(), 50.0, BULLET_BOUNDS_TIGHTNESS);
        b
    }

    fn enemies_at(positions: &[Vec2]) -> (ObjectPool<Enemy>, Vec<Handle>) {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut pool: ObjectPool<Enemy> = ObjectPool::with_capacity(8);
        let mut active = Vec::new();
        for &pos in positions {
            let h = pool.acquire().unwrap();
            pool[h].initialize(pos, EnemyKind::Basic, arena(), SHIP_SPRITE_SIZE, SPRITE_BOUNDS_TIGHTNESS, &mut rng);
            active.push(h);
        }
        (pool, active)
    }

    #[test]
    fn test_first_match_wins_over_nearest() {
        let (pool, active) = enemies_at(&[Vec2::new(115.0, 100.0), Vec2::new(100.0, 100.0)]);
        let b = bullet_at(BulletOwner::Player, Vec2::new(100.0, 100.0));
        assert_eq!(bullet_target(&b, &active, &pool, None), Some(HitTarget::Enemy(active[0])));
    }

    #[test]
    fn test_dead_enemies_skipped() {
        let (mut pool, active) = enemies_at(&[Vec2::new(100.0, 100.0), Vec2::new(105.0, 100.0)]);
        pool[active[0]].take_damage(1000.0);
        let b = bullet_at(BulletOwner::Player, Vec2::new(100.0, 100.0));
        assert_eq!(first_overlap(&b.bounds(), &active, &pool), Some(active[1]));
    }

    #[test]
    fn test_miss_outside_tight_bounds() {
        // Inside the 64px sprite square but outside the 60% tight box
        let (pool, active) = enemies_at(&[Vec2::new(100.0, 100.0)]);
        let b = bullet_at(BulletOwner::Player, Vec2::new(100.0 + 30.0, 100.0));
        assert_eq!(bullet_target(&b, &active, &pool, None), None);
    }

    #[test]
    fn test_enemy_bullet_only_hits_player() {
        let (pool, active) = enemies_at(&[Vec2::new(300.0, 300.0)]);
        let mut player = Player::default();
        player.initialize(Vec2::new(600.0, 600.0), arena(), &PlayerTuning::default(), SPRITE_BOUNDS_TIGHTNESS);

        let on_enemy = bullet_at(BulletOwner::Enemy, Vec2::new(300.0, 300.0));
        assert_eq!(bullet_target(&on_enemy, &active, &pool, Some(&player)), None);

        let on_player = bullet_at(BulletOwner::Enemy, Vec2::new(600.0, 600.0));
        assert_eq!(bullet_target(&on_player, &active, &pool, Some(&player)), Some(HitTarget::Player));
        assert_eq!(bullet_target(&on_player, &active, &pool, None), None);
    }

    #[test]
    fn test_dead_bullet_hits_nothing() {
        let (pool, active) = enemies_at(&[Vec2::new(100.0, 100.0)]);
        let mut b = bullet_at(BulletOwner::Player, Vec2::new(100.0, 100.0));
        b.kill();
        assert_eq!(bullet_target(&b, &active, &pool, None), None);
    }
}
