//! Fixed rider information: fares, service notices and safety advice.

use model::information::{MaintenanceNotice, NoticeKind, SafetyTip, Tariff};
use utility::id::Id;

pub fn tariffs() -> Vec<Tariff> {
    [
        ("Tarifa General", 1.50, "Adultos (18-59 años)"),
        ("Tarifa Universitaria", 0.75, "Estudiantes universitarios con carnet"),
        ("Tarifa Escolar", 0.50, "Estudiantes de colegio"),
        (
            "Tarifa Preferencial",
            0.50,
            "Adultos mayores (60+) y personas con discapacidad",
        ),
        ("Tarifa Niños", 0.00, "Menores de 5 años (gratis)"),
    ]
    .into_iter()
    .map(|(kind, price_soles, description)| Tariff {
        kind: kind.to_owned(),
        price_soles,
        description: description.to_owned(),
    })
    .collect()
}

pub fn maintenance_notices() -> Vec<MaintenanceNotice> {
    vec![
        MaintenanceNotice {
            id: Id::new(1),
            title: "Mantenimiento programado - Línea 1".to_owned(),
            description: "Se realizará mantenimiento preventivo en las estaciones \
                Villa El Salvador y Villa María del Triunfo."
                .to_owned(),
            date: "15 de Noviembre, 2025".to_owned(),
            affected_lines: vec!["Línea 1".to_owned()],
            kind: NoticeKind::Maintenance,
        },
        MaintenanceNotice {
            id: Id::new(2),
            title: "Horario reducido - Línea 2".to_owned(),
            description: "Por trabajos de mejora en la infraestructura, la Línea 2 \
                operará en horario reducido."
                .to_owned(),
            date: "20 de Noviembre, 2025".to_owned(),
            affected_lines: vec!["Línea 2".to_owned()],
            kind: NoticeKind::Maintenance,
        },
    ]
}

const SAFETY_TIPS: [(&str, &str, &str); 8] = [
    (
        "Mantén tus pertenencias seguras",
        "Mantén tus pertenencias siempre a la vista y cerca de ti. No dejes objetos de valor desatendidos.",
        "security",
    ),
    (
        "Respeta la línea amarilla",
        "Mantente detrás de la línea amarilla en el andén mientras esperas el tren.",
        "warning",
    ),
    (
        "Deja salir primero",
        "Permite que los pasajeros salgan del vagón antes de ingresar.",
        "exit",
    ),
    (
        "Cede el asiento prioritario",
        "Los asientos preferenciales están destinados a adultos mayores, mujeres embarazadas y personas con discapacidad.",
        "accessible",
    ),
    (
        "No obstruyas las puertas",
        "Evita obstruir las puertas del tren. Permite su correcto cierre para la seguridad de todos.",
        "door",
    ),
    (
        "Reporta situaciones sospechosas",
        "Si observas algún comportamiento sospechoso o paquetes sin dueño, notifica inmediatamente al personal de seguridad.",
        "report",
    ),
    (
        "Mantén limpio el metro",
        "No consumas alimentos ni bebidas en los vagones. Ayuda a mantener limpio el sistema de transporte.",
        "clean",
    ),
    (
        "En caso de emergencia",
        "Mantén la calma y sigue las instrucciones del personal. Ubica las salidas de emergencia más cercanas.",
        "emergency",
    ),
];

pub fn safety_tips() -> Vec<SafetyTip> {
    SAFETY_TIPS
        .iter()
        .zip(1..)
        .map(|((title, description, icon), id)| SafetyTip {
            id: Id::new(id),
            title: (*title).to_owned(),
            description: (*description).to_owned(),
            icon: (*icon).to_owned(),
        })
        .collect()
}
