use crate::engine::gifts::chime::GiftChime;
use crate::engine::gifts::registry::GiftRegistry;
use crate::engine::gifts::spawner::GiftMarker;
use crate::engine::vehicle::spawn::VehicleCollider;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Collect gifts whose trigger the sleigh has just entered.
pub fn collect_gifts(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    vehicles: Query<(), With<VehicleCollider>>,
    gifts: Query<&GiftMarker>,
    mut registry: ResMut<GiftRegistry>,
    mut chime: Option<ResMut<GiftChime>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in collisions.read() {
        let CollisionEvent::Started(a, b, _) = *event else {
            continue;
        };

        let (gift_entity, marker) = match (gifts.get(a), gifts.get(b)) {
            (Ok(marker), Err(_)) if vehicles.contains(b) => (a, marker),
            (Err(_), Ok(marker)) if vehicles.contains(a) => (b, marker),
            _ => continue,
        };

        // Duplicate events for the same gift fall through here.
        let Some(gift) = registry.collect(marker.index) else {
            continue;
        };

        commands.entity(gift_entity).try_despawn();
        if let Some(chime) = chime.as_deref_mut() {
            chime.restart(&mut commands);
        }

        info!(
            "Collected gift {} ({} of {} left)",
            gift.index,
            registry.remaining(),
            registry.total()
        );
        rpc_interface.send_notification(
            "gift_collected",
            serde_json::json!({
                "index": gift.index,
                "remaining": registry.remaining(),
                "total": registry.total()
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::gifts::spawner::Gift;
    use bevy_rapier3d::rapier::geometry::CollisionEventFlags;

    struct Fixture {
        app: App,
        vehicle: Entity,
        gifts: Vec<Entity>,
    }

    fn fixture(count: usize) -> Fixture {
        let mut app = App::new();
        app.add_event::<CollisionEvent>()
            .init_resource::<WebRpcInterface>()
            .init_resource::<GiftRegistry>()
            .add_systems(Update, collect_gifts);

        app.world_mut()
            .resource_mut::<GiftRegistry>()
            .reset((0..count).map(Gift::for_test).collect());

        let vehicle = app.world_mut().spawn(VehicleCollider).id();
        let gifts = (0..count)
            .map(|index| app.world_mut().spawn(GiftMarker { index }).id())
            .collect();

        Fixture {
            app,
            vehicle,
            gifts,
        }
    }

    fn started(a: Entity, b: Entity) -> CollisionEvent {
        CollisionEvent::Started(a, b, CollisionEventFlags::SENSOR)
    }

    #[test]
    fn vehicle_entering_trigger_collects_gift() {
        let mut f = fixture(3);
        f.app.world_mut().send_event(started(f.gifts[1], f.vehicle));
        f.app.update();

        let registry = f.app.world().resource::<GiftRegistry>();
        assert_eq!(registry.remaining(), 2);
        assert!(!registry.is_active(1));
        assert!(f.app.world().get_entity(f.gifts[1]).is_err());
        assert!(f.app.world().get_entity(f.gifts[0]).is_ok());
    }

    #[test]
    fn duplicate_events_collect_once() {
        let mut f = fixture(3);
        f.app.world_mut().send_event(started(f.vehicle, f.gifts[2]));
        f.app.world_mut().send_event(started(f.gifts[2], f.vehicle));
        f.app.update();
        f.app.world_mut().send_event(started(f.gifts[2], f.vehicle));
        f.app.update();

        assert_eq!(f.app.world().resource::<GiftRegistry>().remaining(), 2);
    }

    #[test]
    fn other_bodies_do_not_collect() {
        let mut f = fixture(2);
        let stranger = f.app.world_mut().spawn_empty().id();
        f.app.world_mut().send_event(started(f.gifts[0], stranger));
        f.app.world_mut().send_event(CollisionEvent::Stopped(
            f.gifts[1],
            f.vehicle,
            CollisionEventFlags::SENSOR,
        ));
        f.app.update();

        assert_eq!(f.app.world().resource::<GiftRegistry>().remaining(), 2);
    }

    #[test]
    fn simultaneous_pickups_are_independent() {
        let mut f = fixture(3);
        f.app.world_mut().send_event(started(f.gifts[0], f.vehicle));
        f.app.world_mut().send_event(started(f.gifts[2], f.vehicle));
        f.app.update();

        let registry = f.app.world().resource::<GiftRegistry>();
        assert_eq!(registry.remaining(), 1);
        assert!(registry.is_active(1));
    }
}
