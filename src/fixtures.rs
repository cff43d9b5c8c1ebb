//! Demo catalog seeded into an empty database on startup (dev panel's
//! "Ladda Data" set). Coordinates are real spots around Gothenburg.

use crate::models::{Coordinates, GroupActivity, JoinPolicy, Participant};

/// Access code carried by the private fixtures.
pub const FIXTURE_ACCESS_CODE: &str = "1234";

fn host(id: &str, name: &str, avatar_id: i64) -> Participant {
    Participant {
        id: id.to_string(),
        name: name.to_string(),
        avatar_id,
        avatar_config: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn activity(
    id: &str,
    host: Participant,
    title: &str,
    description: &str,
    category: &str,
    date: &str,
    time: &str,
    duration_min: i64,
    location_name: &str,
    coordinates: Coordinates,
    current_participants: i64,
    max_participants: i64,
    skill_level: &str,
    join_policy: JoinPolicy,
) -> GroupActivity {
    GroupActivity {
        id: id.to_string(),
        host,
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        duration_min,
        location_name: location_name.to_string(),
        location_city: "Göteborg".to_string(),
        coordinates,
        current_participants,
        max_participants,
        skill_level: skill_level.to_string(),
        join_policy,
        access_code: match join_policy {
            JoinPolicy::Private => Some(FIXTURE_ACCESS_CODE.to_string()),
            _ => None,
        },
    }
}

pub fn catalog() -> Vec<GroupActivity> {
    vec![
        activity(
            "1",
            host("u1", "Anna Svensson", 1),
            "Söndagspromenad Slottsskogen",
            "En lugn promenad runt hela parken. Vi stannar för kaffe vid Villa Belparc. Alla är välkomna, även hundar!",
            "Promenad",
            "2024-10-20",
            "11:00",
            90,
            "Linnéplatsen (Entrén)",
            Coordinates { lat: 57.6908, lng: 11.9520 },
            8,
            15,
            "Alla nivåer",
            JoinPolicy::Open,
        ),
        activity(
            "2",
            host("u2", "Johan Berg", 2),
            "Padel Lunchmatch",
            "Vi saknar en spelare för en Americano på lunchen. Medelnivå (4-5 på skalan). Bra tempo men glatt humör!",
            "Padel",
            "2024-10-18",
            "12:00",
            60,
            "PDL Center Frihamnen",
            Coordinates { lat: 57.7165, lng: 11.9475 },
            3,
            4,
            "Medel",
            JoinPolicy::Apply,
        ),
        activity(
            "3",
            host("u3", "Erik Andersson", 3),
            "Kvällsfotboll på Heden",
            "Spontan 5v5 match. Vi har västar och boll. Kom ombytt och klar!",
            "Fotboll",
            "2024-10-18",
            "18:00",
            60,
            "Heden Konstgräs",
            Coordinates { lat: 57.7013, lng: 11.9784 },
            7,
            10,
            "Alla nivåer",
            JoinPolicy::Open,
        ),
        activity(
            "5",
            host("u5", "Maria Karlsson", 5),
            "Morgonjogg längs älven",
            "Avslappnad jogging 5-7km i prattempo. Vi startar vid Operan och springer mot Röda Sten.",
            "Löpning",
            "2024-10-19",
            "07:00",
            60,
            "Göteborgsoperan",
            Coordinates { lat: 57.7119, lng: 11.9634 },
            4,
            10,
            "Medel",
            JoinPolicy::Open,
        ),
        activity(
            "6",
            host("u6", "Idrottslärare Sven", 6),
            "Simlektion Gymnasiet (Valhalla)",
            "Simprov för årskurs 2. Samling i entrén. Glöm inte hänglås!",
            "Promenad",
            "2024-10-22",
            "13:30",
            90,
            "Valhallabadet",
            Coordinates { lat: 57.6993, lng: 11.9904 },
            28,
            30,
            "Nybörjare",
            JoinPolicy::Private,
        ),
        activity(
            "7",
            host("u7", "Klara", 7),
            "Boule i Trädgårdsföreningen",
            "Vi spelar några omgångar boule och äter glass om vädret tillåter.",
            "Boule",
            "2024-10-21",
            "16:00",
            120,
            "Trädgårdsföreningen",
            Coordinates { lat: 57.7067, lng: 11.9750 },
            2,
            8,
            "Alla nivåer",
            JoinPolicy::Open,
        ),
        activity(
            "8",
            host("u8", "Ali Rez", 8),
            "Elit Tennis Match",
            "Söker en stark spelare för singelmatch. Jag ligger på nivå 5.0.",
            "Tennis",
            "2024-10-24",
            "19:00",
            60,
            "GLTK",
            Coordinates { lat: 57.6975, lng: 12.0150 },
            1,
            2,
            "Avancerad",
            JoinPolicy::Apply,
        ),
        activity(
            "9",
            host("u9", "Sara", 9),
            "Utegym Skatås",
            "Cirkelträning vid utegymmet. Vi kör 3 varv gemensamt.",
            "Utegym",
            "2024-10-20",
            "10:00",
            45,
            "Skatås Motionscentrum",
            Coordinates { lat: 57.7035, lng: 12.0337 },
            5,
            10,
            "Alla nivåer",
            JoinPolicy::Open,
        ),
    ]
}
